//! Single-student move protocol.
//!
//! # States
//!
//! `Idle → PendingGroupDecision → Idle`. A request is planned against the
//! roster ([`plan_move`]); if the student has groupmates in its current
//! class the plan is a [`PendingGroupMove`] that must be resolved with a
//! [`GroupMoveChoice`] before anything changes. Abandoning the pending
//! move (dropping it, or a decider answering `None`) leaves the roster
//! untouched.
//!
//! Drag-based and list-based entry points both go through
//! [`MoveOrchestrator::move_student`], so there is exactly one decision
//! protocol.

use serde::Serialize;
use tracing::{debug, info};

use super::decision::{GroupMoveChoice, GroupMoveDecider, GroupMovePrompt};
use crate::error::{Result, RosterError};
use crate::groups::members_of;
use crate::models::{ClassId, Roster, Student, StudentId};

/// A fully decided roster mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
    pub from: ClassId,
    pub to: ClassId,
    pub students: Vec<StudentId>,
    pub detach_group: bool,
}

impl MoveRequest {
    /// Applies the move atomically.
    pub fn apply(&self, roster: &mut Roster) -> Result<MoveOutcome> {
        let moved = roster.move_students(self.from, self.to, &self.students, self.detach_group)?;
        Ok(MoveOutcome::Moved {
            from: self.from,
            to: self.to,
            students: moved,
            detached: self.detach_group,
        })
    }
}

/// A move waiting on the operator's group decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGroupMove {
    prompt: GroupMovePrompt,
}

impl PendingGroupMove {
    /// What the operator must decide.
    pub fn prompt(&self) -> &GroupMovePrompt {
        &self.prompt
    }

    /// Turns the decision into a concrete request.
    pub fn resolve(self, choice: GroupMoveChoice) -> MoveRequest {
        let p = self.prompt;
        match choice {
            GroupMoveChoice::WholeGroup => {
                let mut students = Vec::with_capacity(p.groupmates.len() + 1);
                students.push(p.student);
                students.extend(p.groupmates);
                MoveRequest {
                    from: p.from,
                    to: p.to,
                    students,
                    detach_group: false,
                }
            }
            GroupMoveChoice::Alone => MoveRequest {
                from: p.from,
                to: p.to,
                students: vec![p.student],
                detach_group: true,
            },
        }
    }
}

/// Result of planning a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Student is already in the target class.
    Unchanged { student: StudentId, class_id: ClassId },
    /// No decision needed.
    Direct(MoveRequest),
    /// Groupmates share the source class; the operator must choose.
    NeedsDecision(PendingGroupMove),
}

impl MovePlan {
    /// Completes the plan, asking `decider` only for a pending group move.
    pub fn apply<D>(self, roster: &mut Roster, decider: &mut D) -> Result<MoveOutcome>
    where
        D: GroupMoveDecider + ?Sized,
    {
        let request = match self {
            MovePlan::Unchanged { .. } => return Ok(MoveOutcome::Unchanged),
            MovePlan::Direct(request) => request,
            MovePlan::NeedsDecision(pending) => {
                let student = pending.prompt().student;
                match decider.decide(pending.prompt()) {
                    Some(choice) => {
                        debug!(student = %student, ?choice, "group move decided");
                        pending.resolve(choice)
                    }
                    None => {
                        info!(student = %student, "group move abandoned");
                        return Ok(MoveOutcome::Abandoned);
                    }
                }
            }
        };
        request.apply(roster)
    }
}

/// What a move request did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// Target equals current class; nothing changed.
    Unchanged,
    /// Students were relocated.
    Moved {
        from: ClassId,
        to: ClassId,
        students: Vec<StudentId>,
        detached: bool,
    },
    /// The group decision was abandoned; nothing changed.
    Abandoned,
}

/// Plans moving `student` to class `to`.
///
/// Locates the student from the roster's class lists (never from a cached
/// copy) and looks up groupmates in the source class.
///
/// # Errors
/// `UnknownStudent` if the student is not placed, `UnknownClass` if `to`
/// does not exist.
pub fn plan_move(roster: &Roster, student: StudentId, to: ClassId) -> Result<MovePlan> {
    let from = roster
        .locate(student)
        .ok_or(RosterError::UnknownStudent(student))?;
    if from == to {
        return Ok(MovePlan::Unchanged {
            student,
            class_id: from,
        });
    }
    if !roster.contains_class(to) {
        return Err(RosterError::UnknownClass(to));
    }
    let record = roster
        .student(student)
        .ok_or(RosterError::UnknownStudent(student))?;

    let direct = MoveRequest {
        from,
        to,
        students: vec![student],
        detach_group: false,
    };
    if !record.has_group() {
        return Ok(MovePlan::Direct(direct));
    }

    let groupmates: Vec<StudentId> = members_of(roster, &record.group_id, from, Some(student))
        .into_iter()
        .map(|s| s.id)
        .collect();
    if groupmates.is_empty() {
        return Ok(MovePlan::Direct(direct));
    }

    Ok(MovePlan::NeedsDecision(PendingGroupMove {
        prompt: GroupMovePrompt {
            student,
            student_name: record.name.clone(),
            group_id: record.group_id.clone(),
            from,
            to,
            groupmates,
        },
    }))
}

/// Runs the move protocol and tracks the operator's open student.
///
/// # Example
///
/// ```
/// use u_roster::assign::AutoAssigner;
/// use u_roster::models::{Student, StudentId};
/// use u_roster::moves::{FixedChoice, GroupMoveChoice, MoveOrchestrator, MoveOutcome};
///
/// let students = vec![
///     Student::new(StudentId(0), "A").with_group("G1"),
///     Student::new(StudentId(1), "B").with_group("G1"),
/// ];
/// let mut roster = AutoAssigner::new().assign_seeded(students, 2, 0).unwrap();
/// let mut orchestrator = MoveOrchestrator::new();
///
/// let outcome = orchestrator
///     .move_student(&mut roster, StudentId(0), 2, &mut FixedChoice(Some(GroupMoveChoice::WholeGroup)))
///     .unwrap();
/// assert!(matches!(outcome, MoveOutcome::Moved { .. }));
/// assert_eq!(roster.class_len(2), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoveOrchestrator {
    selected: Option<Student>,
}

impl MoveOrchestrator {
    /// Creates an orchestrator with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a student's detail projection.
    pub fn select(&mut self, roster: &Roster, id: StudentId) -> Result<&Student> {
        let student = roster
            .student(id)
            .cloned()
            .ok_or(RosterError::UnknownStudent(id))?;
        Ok(self.selected.insert(student))
    }

    /// Closes the detail projection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The currently open student, as of the last roster change.
    pub fn selected(&self) -> Option<&Student> {
        self.selected.as_ref()
    }

    /// Re-reads the open student from the roster.
    pub fn refresh_selection(&mut self, roster: &Roster) {
        let Some(id) = self.selected.as_ref().map(|s| s.id) else {
            return;
        };
        self.selected = roster.student(id).cloned();
    }

    /// Moves `student` to class `to`, asking `decider` when groupmates are
    /// involved.
    ///
    /// No mutation happens before the decision is made; an abandoned
    /// decision returns [`MoveOutcome::Abandoned`] with the roster intact.
    pub fn move_student<D>(
        &mut self,
        roster: &mut Roster,
        student: StudentId,
        to: ClassId,
        decider: &mut D,
    ) -> Result<MoveOutcome>
    where
        D: GroupMoveDecider + ?Sized,
    {
        let outcome = plan_move(roster, student, to)?.apply(roster, decider)?;
        self.refresh_selection(roster);
        Ok(outcome)
    }

    /// List-based entry point: moves the currently selected student.
    ///
    /// # Errors
    /// `NoSelection` if nothing is open.
    pub fn move_selected<D>(
        &mut self,
        roster: &mut Roster,
        to: ClassId,
        decider: &mut D,
    ) -> Result<MoveOutcome>
    where
        D: GroupMoveDecider + ?Sized,
    {
        let id = self.selected.as_ref().ok_or(RosterError::NoSelection)?.id;
        self.move_student(roster, id, to, decider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::FixedChoice;
    use crate::models::Gender;

    fn roster() -> Roster {
        let mut r = Roster::with_classes(3);
        r.place(
            Student::new(StudentId(0), "A")
                .with_gender(Gender::Female)
                .with_group("G1"),
            1,
        );
        r.place(
            Student::new(StudentId(1), "B")
                .with_gender(Gender::Female)
                .with_group("G1"),
            1,
        );
        r.place(Student::new(StudentId(2), "C").with_gender(Gender::Male), 1);
        r.place(Student::new(StudentId(3), "D").with_group("G2"), 2);
        r
    }

    fn never_asked(_: &GroupMovePrompt) -> Option<GroupMoveChoice> {
        panic!("decider must not be consulted")
    }

    #[test]
    fn test_alone_detaches_only_mover() {
        let mut r = roster();
        let mut o = MoveOrchestrator::new();
        let outcome = o
            .move_student(&mut r, StudentId(0), 2, &mut FixedChoice(Some(GroupMoveChoice::Alone)))
            .unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: 1,
                to: 2,
                students: vec![StudentId(0)],
                detached: true
            }
        );
        let a = r.student(StudentId(0)).unwrap();
        assert_eq!(a.current_class, Some(2));
        assert_eq!(a.group_id, "");
        assert!(a.note.contains("G1"));
        assert!(a.note.contains("분리이동"));

        let b = r.student(StudentId(1)).unwrap();
        assert_eq!(b.current_class, Some(1));
        assert_eq!(b.group_id, "G1");
    }

    #[test]
    fn test_whole_group_moves_together() {
        let mut r = roster();
        let total = r.placed_count();
        let mut o = MoveOrchestrator::new();
        o.move_student(
            &mut r,
            StudentId(1),
            3,
            &mut FixedChoice(Some(GroupMoveChoice::WholeGroup)),
        )
        .unwrap();

        assert_eq!(r.student_ids_in(3).unwrap(), &[StudentId(1), StudentId(0)]);
        for id in [StudentId(0), StudentId(1)] {
            let s = r.student(id).unwrap();
            assert_eq!(s.group_id, "G1");
            assert!(s.is_manually_moved);
            assert_eq!(s.initial_class, None);
        }
        assert_eq!(r.placed_count(), total);
    }

    #[test]
    fn test_abandoned_decision_changes_nothing() {
        let mut r = roster();
        let before = r.clone();
        let mut o = MoveOrchestrator::new();
        let outcome = o
            .move_student(&mut r, StudentId(0), 2, &mut FixedChoice(None))
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Abandoned);
        assert_eq!(r, before);
    }

    #[test]
    fn test_same_class_is_noop() {
        let mut r = roster();
        let before = r.clone();
        let mut o = MoveOrchestrator::new();
        let outcome = o
            .move_student(&mut r, StudentId(0), 1, &mut never_asked)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(r, before);
    }

    #[test]
    fn test_ungrouped_and_lone_grouped_move_directly() {
        let mut r = roster();
        let mut o = MoveOrchestrator::new();
        o.move_student(&mut r, StudentId(2), 2, &mut never_asked)
            .unwrap();
        // D is the only G2 member in class 2
        o.move_student(&mut r, StudentId(3), 1, &mut never_asked)
            .unwrap();

        let d = r.student(StudentId(3)).unwrap();
        assert_eq!(d.group_id, "G2");
        assert_eq!(d.current_class, Some(1));
        assert!(d.is_manually_moved);
    }

    #[test]
    fn test_prompt_contents() {
        let r = roster();
        let plan = plan_move(&r, StudentId(0), 2).unwrap();
        let MovePlan::NeedsDecision(pending) = plan else {
            panic!("expected a pending decision");
        };
        let p = pending.prompt();
        assert_eq!(p.group_id, "G1");
        assert_eq!(p.from, 1);
        assert_eq!(p.groupmates, vec![StudentId(1)]);
    }

    #[test]
    fn test_two_phase_plan_apply() {
        let mut r = roster();
        let plan = plan_move(&r, StudentId(1), 3).unwrap();
        let outcome = plan
            .apply(&mut r, &mut FixedChoice(Some(GroupMoveChoice::WholeGroup)))
            .unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: 1,
                to: 3,
                students: vec![StudentId(1), StudentId(0)],
                detached: false,
            }
        );
        assert_eq!(r.student_ids_in(3), Some(&[StudentId(1), StudentId(0)][..]));
    }

    #[test]
    fn test_plan_errors() {
        let r = roster();
        assert!(matches!(
            plan_move(&r, StudentId(99), 1),
            Err(RosterError::UnknownStudent(_))
        ));
        assert!(matches!(
            plan_move(&r, StudentId(2), 9),
            Err(RosterError::UnknownClass(9))
        ));
    }

    #[test]
    fn test_selection_follows_move() {
        let mut r = roster();
        let mut o = MoveOrchestrator::new();
        o.select(&r, StudentId(1)).unwrap();

        // Moving A with the whole group also moves the selected B
        o.move_student(
            &mut r,
            StudentId(0),
            2,
            &mut FixedChoice(Some(GroupMoveChoice::WholeGroup)),
        )
        .unwrap();
        let sel = o.selected().unwrap();
        assert_eq!(sel.current_class, Some(2));
        assert!(sel.is_manually_moved);
    }

    #[test]
    fn test_move_selected() {
        let mut r = roster();
        let mut o = MoveOrchestrator::new();
        assert!(matches!(
            o.move_selected(&mut r, 2, &mut never_asked),
            Err(RosterError::NoSelection)
        ));

        o.select(&r, StudentId(0)).unwrap();
        let mut prompts = Vec::new();
        let mut decider = |p: &GroupMovePrompt| {
            prompts.push(p.clone());
            Some(GroupMoveChoice::Alone)
        };
        o.move_selected(&mut r, 3, &mut decider).unwrap();
        assert_eq!(prompts.len(), 1);

        let sel = o.selected().unwrap();
        assert_eq!(sel.current_class, Some(3));
        assert_eq!(sel.group_id, "");
    }

    #[test]
    fn test_random_moves_preserve_invariants() {
        use crate::assign::AutoAssigner;
        use crate::validation::validate_roster;
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let students: Vec<Student> = (0..24)
            .map(|i| {
                let group = match i % 6 {
                    0 | 1 => "G1",
                    2 => "G2",
                    _ => "",
                };
                Student::new(StudentId(i), format!("S{i}")).with_group(group)
            })
            .collect();
        let mut r = AutoAssigner::new().assign_seeded(students, 4, 8).unwrap();
        let mut o = MoveOrchestrator::new();
        let mut rng = SmallRng::seed_from_u64(99);
        let mut touched = Vec::new();

        for _ in 0..200 {
            let id = StudentId(rng.random_range(0..24));
            let to = rng.random_range(1..=4);
            let choice = match rng.random_range(0..3) {
                0 => None,
                1 => Some(GroupMoveChoice::Alone),
                _ => Some(GroupMoveChoice::WholeGroup),
            };
            let before = r.clone();
            let outcome = o
                .move_student(&mut r, id, to, &mut FixedChoice(choice))
                .unwrap();

            match outcome {
                MoveOutcome::Moved { students, .. } => touched.extend(students),
                MoveOutcome::Unchanged | MoveOutcome::Abandoned => assert_eq!(r, before),
            }
            assert_eq!(r.placed_count(), 24);
            for s in r.students() {
                let holders = r
                    .iter_classes()
                    .filter(|(_, ids)| ids.contains(&s.id))
                    .count();
                assert_eq!(holders, 1);
            }
            for t in &touched {
                assert!(r.student(*t).unwrap().is_manually_moved);
            }
        }
        // Whole-group moves and detaches never leave a group split
        assert!(validate_roster(&r).is_ok());
    }

    #[test]
    fn test_stale_plan_is_rejected_atomically() {
        let mut r = roster();
        let plan = plan_move(&r, StudentId(2), 2).unwrap();
        r.move_students(1, 3, &[StudentId(2)], false).unwrap();
        let snapshot = r.clone();

        let MovePlan::Direct(request) = plan else {
            panic!("expected direct move");
        };
        assert!(matches!(
            request.apply(&mut r),
            Err(RosterError::StudentNotInClass { .. })
        ));
        assert_eq!(r, snapshot);
    }
}
