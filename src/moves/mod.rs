//! Move orchestration.
//!
//! Decides, for a requested single-student move, whether groupmates must
//! be offered for inclusion, and dispatches the resulting atomic mutation
//! to the [`Roster`](crate::models::Roster).
//!
//! # Usage
//!
//! ```
//! use u_roster::assign::AutoAssigner;
//! use u_roster::models::{Student, StudentId};
//! use u_roster::moves::{GroupMoveChoice, GroupMovePrompt, MoveOrchestrator};
//!
//! let students = vec![
//!     Student::new(StudentId(0), "A").with_group("G1"),
//!     Student::new(StudentId(1), "B").with_group("G1"),
//! ];
//! let mut roster = AutoAssigner::new().assign_seeded(students, 2, 0).unwrap();
//!
//! let mut ask = |p: &GroupMovePrompt| {
//!     println!("{}", p.message());
//!     Some(GroupMoveChoice::Alone)
//! };
//! MoveOrchestrator::new()
//!     .move_student(&mut roster, StudentId(0), 2, &mut ask)
//!     .unwrap();
//! assert_eq!(roster.student(StudentId(0)).unwrap().group_id, "");
//! assert_eq!(roster.student(StudentId(1)).unwrap().group_id, "G1");
//! ```

mod decision;
mod orchestrator;

pub use decision::{FixedChoice, GroupMoveChoice, GroupMoveDecider, GroupMovePrompt};
pub use orchestrator::{
    plan_move, MoveOrchestrator, MoveOutcome, MovePlan, MoveRequest, PendingGroupMove,
};
