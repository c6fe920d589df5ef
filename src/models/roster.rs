//! Roster store.
//!
//! The roster is the authoritative mapping from class id to the ordered list
//! of students placed there. It owns every mutation (move, detach, add and
//! remove class, note edits) and enforces placement invariants:
//!
//! - every student id appears in exactly one class list;
//! - a student's `current_class` always names the list that holds it;
//! - a class with members cannot be removed.
//!
//! Each mutation validates all of its preconditions before changing
//! anything, so a rejected call leaves the roster untouched.

use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

use super::{ClassId, Student, StudentId};
use crate::error::{Result, RosterError};

/// Mapping from class id to placed students.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    classes: BTreeMap<ClassId, Vec<StudentId>>,
    students: BTreeMap<StudentId, Student>,
}

impl Roster {
    /// Creates an empty roster with no classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster with empty classes `1..=count`.
    pub fn with_classes(count: u32) -> Self {
        let mut roster = Self::new();
        for id in 1..=count {
            roster.classes.insert(id, Vec::new());
        }
        roster
    }

    /// Places a new student at the end of `class_id`, creating the class
    /// if needed. Sets `current_class`; `initial_class` is left to the caller.
    pub(crate) fn place(&mut self, mut student: Student, class_id: ClassId) {
        student.current_class = Some(class_id);
        self.classes.entry(class_id).or_default().push(student.id);
        self.students.insert(student.id, student);
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Class ids in ascending order.
    pub fn class_ids(&self) -> Vec<ClassId> {
        self.classes.keys().copied().collect()
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Whether the class exists.
    pub fn contains_class(&self, class_id: ClassId) -> bool {
        self.classes.contains_key(&class_id)
    }

    /// Student ids in a class, in display order.
    pub fn student_ids_in(&self, class_id: ClassId) -> Option<&[StudentId]> {
        self.classes.get(&class_id).map(Vec::as_slice)
    }

    /// Students in a class, in display order. Empty for unknown classes.
    pub fn students_in(&self, class_id: ClassId) -> Vec<&Student> {
        self.classes
            .get(&class_id)
            .map(|ids| ids.iter().filter_map(|id| self.students.get(id)).collect())
            .unwrap_or_default()
    }

    /// Students in a class sorted by name (read-only view).
    ///
    /// Names compare under the Unicode Collation Algorithm, the same order
    /// export uses.
    pub fn students_sorted_by_name(&self, class_id: ClassId) -> Vec<&Student> {
        let mut list = self.students_in(class_id);
        let mut collator = Collator::default();
        list.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
        list
    }

    /// Number of students in a class (0 for unknown classes).
    pub fn class_len(&self, class_id: ClassId) -> usize {
        self.classes.get(&class_id).map_or(0, Vec::len)
    }

    /// Looks up a student record.
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Finds the class whose list holds the student.
    ///
    /// Reads the class lists rather than the record's cached field.
    pub fn locate(&self, id: StudentId) -> Option<ClassId> {
        self.classes
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(&class_id, _)| class_id)
    }

    /// All students, ordered by id.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Number of student records.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Sum of all class list lengths.
    pub fn placed_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    /// Iterates `(class_id, student ids)` in class order.
    pub fn iter_classes(&self) -> impl Iterator<Item = (ClassId, &[StudentId])> {
        self.classes.iter().map(|(&id, ids)| (id, ids.as_slice()))
    }

    /// Names that occur more than once within a class.
    pub fn duplicate_names(&self, class_id: ClassId) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for s in self.students_in(class_id) {
            *counts.entry(s.name.as_str()).or_insert(0) += 1;
        }
        let mut dups: Vec<String> = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(name, _)| name.to_string())
            .collect();
        dups.sort();
        dups
    }

    /// Consumes the roster, returning student records ordered by id.
    pub fn into_students(self) -> Vec<Student> {
        self.students.into_values().collect()
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    /// Adds an empty class with id `max + 1` (or `1` when there are none).
    ///
    /// # Errors
    /// `ClassIdExhausted` if the largest class id is already `u32::MAX`.
    pub fn add_class(&mut self) -> Result<ClassId> {
        let next = match self.classes.keys().next_back() {
            Some(&max) => max
                .checked_add(1)
                .ok_or(RosterError::ClassIdExhausted(max))?,
            None => 1,
        };
        self.classes.insert(next, Vec::new());
        debug!(class_id = next, "class added");
        Ok(next)
    }

    /// Removes an empty class.
    ///
    /// # Errors
    /// `NonEmptyClass` if the class still has members, `UnknownClass` if it
    /// does not exist. The roster is unchanged in both cases.
    pub fn remove_class(&mut self, class_id: ClassId) -> Result<()> {
        let count = self
            .classes
            .get(&class_id)
            .ok_or(RosterError::UnknownClass(class_id))?
            .len();
        if count > 0 {
            warn!(class_id, count, "refusing to remove non-empty class");
            return Err(RosterError::NonEmptyClass { class_id, count });
        }
        self.classes.remove(&class_id);
        debug!(class_id, "class removed");
        Ok(())
    }

    /// Moves students from one class to another in a single atomic step.
    ///
    /// The students are removed from `from` and appended to `to` in the
    /// given order. Each gets `current_class = to` and
    /// `is_manually_moved = true`. With `detach_group`, each also loses its
    /// `group_id` and gains a note recording the group it left.
    ///
    /// Returns the moved ids.
    ///
    /// # Errors
    /// `SameClass`, `UnknownClass`, `UnknownStudent`, `StudentNotInClass`,
    /// or `DuplicateStudent`. All checks run before any mutation.
    pub fn move_students(
        &mut self,
        from: ClassId,
        to: ClassId,
        ids: &[StudentId],
        detach_group: bool,
    ) -> Result<Vec<StudentId>> {
        if from == to {
            return Err(RosterError::SameClass(to));
        }
        let source = self
            .classes
            .get(&from)
            .ok_or(RosterError::UnknownClass(from))?;
        if !self.classes.contains_key(&to) {
            return Err(RosterError::UnknownClass(to));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if !self.students.contains_key(&id) {
                return Err(RosterError::UnknownStudent(id));
            }
            if !seen.insert(id) {
                return Err(RosterError::DuplicateStudent(id));
            }
            if !source.contains(&id) {
                return Err(RosterError::StudentNotInClass {
                    student: id,
                    class_id: from,
                });
            }
        }

        if let Some(list) = self.classes.get_mut(&from) {
            list.retain(|id| !seen.contains(id));
        }
        if let Some(list) = self.classes.get_mut(&to) {
            list.extend_from_slice(ids);
        }

        for id in ids {
            if let Some(student) = self.students.get_mut(id) {
                student.current_class = Some(to);
                student.is_manually_moved = true;
                if detach_group {
                    let old = std::mem::take(&mut student.group_id);
                    student.append_note(&format!("(그룹 {old}에서 분리이동)"));
                }
            }
        }

        debug!(from, to, count = ids.len(), detach_group, "students moved");
        Ok(ids.to_vec())
    }

    /// Replaces a student's note. No relocation.
    pub fn set_note(&mut self, id: StudentId, text: impl Into<String>) -> Result<()> {
        let student = self
            .students
            .get_mut(&id)
            .ok_or(RosterError::UnknownStudent(id))?;
        student.note = text.into();
        Ok(())
    }

    /// Clears the group of exactly this student, in place, with an audit
    /// note. Groupmates keep their group.
    ///
    /// # Errors
    /// `UnknownStudent`, or `NotGrouped` if the student has no group.
    pub fn detach_group(&mut self, id: StudentId) -> Result<()> {
        let student = self
            .students
            .get_mut(&id)
            .ok_or(RosterError::UnknownStudent(id))?;
        if !student.has_group() {
            return Err(RosterError::NotGrouped(id));
        }
        let old = std::mem::take(&mut student.group_id);
        student.append_note("(그룹 강제해제됨)");
        debug!(student = %id, group = %old, "group detached");
        Ok(())
    }
}
