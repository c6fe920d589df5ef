//! Roster domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Student` | One imported pupil and its placement state |
//! | `Gender` | Normalized gender (`Male`, `Female`, `Unknown`) |
//! | `Roster` | Authoritative class id → ordered student list |
//! | `RawRow` | One import/export row, columns in original order |
//!
//! A cohesion group is not stored: it is the set of students sharing a
//! non-empty `group_id` (see [`crate::groups`]).

mod roster;
mod row;
mod student;

pub use roster::Roster;
pub use row::RawRow;
pub use student::{ClassId, Gender, Student, StudentId};
