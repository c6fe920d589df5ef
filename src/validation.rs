//! Structural validation for rosters.
//!
//! Checks placement integrity of a roster snapshot (for example one loaded
//! from disk or built by an external tool). Detects:
//! - Students placed in no class, or in more than one
//! - Class lists referencing unknown students
//! - `current_class` disagreeing with the list that holds the student
//! - Class id `0`
//! - Cohesion groups spread across several classes

use std::collections::HashMap;

use crate::groups::split_groups;
use crate::models::{ClassId, Roster, StudentId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A student record is not in any class list.
    Unplaced,
    /// A student id appears in more than one class list, or twice in one.
    DuplicatePlacement,
    /// A class list references an id with no student record.
    UnknownStudent,
    /// `current_class` differs from the class that holds the student.
    PlacementMismatch,
    /// Class ids must be positive.
    InvalidClassId,
    /// Group members occupy more than one class.
    SplitGroup,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster snapshot.
///
/// Checks:
/// 1. No class id is `0`
/// 2. Every listed id has a student record
/// 3. Every student appears in exactly one class list, exactly once
/// 4. Each student's `current_class` names that list
/// 5. No cohesion group spans several classes
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();
    let mut holders: HashMap<StudentId, Vec<ClassId>> = HashMap::new();

    for (class_id, ids) in roster.iter_classes() {
        if class_id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClassId,
                "Class id 0 is not allowed",
            ));
        }
        for &id in ids {
            if roster.student(id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownStudent,
                    format!("Class {class_id} lists unknown student '{id}'"),
                ));
                continue;
            }
            holders.entry(id).or_default().push(class_id);
        }
    }

    for student in roster.students() {
        match holders.get(&student.id).map(Vec::as_slice) {
            None | Some([]) => errors.push(ValidationError::new(
                ValidationErrorKind::Unplaced,
                format!("Student '{}' is not placed in any class", student.id),
            )),
            Some([class_id]) => {
                if student.current_class != Some(*class_id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::PlacementMismatch,
                        format!(
                            "Student '{}' is listed in class {} but records {:?}",
                            student.id, class_id, student.current_class
                        ),
                    ));
                }
            }
            Some(many) => errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePlacement,
                format!("Student '{}' is placed {} times: {:?}", student.id, many.len(), many),
            )),
        }
    }

    for (group, classes) in split_groups(roster) {
        errors.push(ValidationError::new(
            ValidationErrorKind::SplitGroup,
            format!("Group '{group}' is split across classes {classes:?}"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::AutoAssigner;
    use crate::models::{Gender, Student};
    use crate::moves::{FixedChoice, GroupMoveChoice, MoveOrchestrator};

    fn sample_students() -> Vec<Student> {
        (0..10)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                let group = if i < 3 { "G1" } else { "" };
                Student::new(StudentId(i), format!("S{i}"))
                    .with_gender(gender)
                    .with_group(group)
            })
            .collect()
    }

    #[test]
    fn test_assigned_roster_is_valid() {
        let roster = AutoAssigner::new()
            .assign_seeded(sample_students(), 3, 5)
            .unwrap();
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn test_valid_after_moves() {
        let mut roster = AutoAssigner::new()
            .assign_seeded(sample_students(), 3, 5)
            .unwrap();
        let mut o = MoveOrchestrator::new();
        let from = roster.locate(StudentId(0)).unwrap();
        let to = if from == 1 { 2 } else { 1 };

        o.move_student(
            &mut roster,
            StudentId(0),
            to,
            &mut FixedChoice(Some(GroupMoveChoice::WholeGroup)),
        )
        .unwrap();
        assert!(validate_roster(&roster).is_ok());

        o.move_student(
            &mut roster,
            StudentId(1),
            from,
            &mut FixedChoice(Some(GroupMoveChoice::Alone)),
        )
        .unwrap();
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn test_split_group_reported() {
        let mut roster = Roster::with_classes(2);
        roster.place(Student::new(StudentId(0), "A").with_group("G"), 1);
        roster.place(Student::new(StudentId(1), "B").with_group("G"), 2);

        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::SplitGroup);
    }

    #[test]
    fn test_duplicate_and_mismatch_detected() {
        let mut roster = Roster::with_classes(2);
        roster.place(Student::new(StudentId(0), "A"), 1);
        // Same record placed again in class 2: listed twice, current = 2
        roster.place(Student::new(StudentId(0), "A"), 2);

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicatePlacement));
    }

    #[test]
    fn test_invalid_class_id() {
        let mut roster = Roster::new();
        roster.place(Student::new(StudentId(0), "A"), 0);
        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidClassId));
    }
}
