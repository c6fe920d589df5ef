//! Error type for roster operations.
//!
//! Every guard rejection leaves the roster exactly as it was before the
//! call. I/O and parse failures only arise at the exchange boundary.

use thiserror::Error;

use crate::models::{ClassId, StudentId};

/// Errors returned by assignment, roster mutation, and exchange operations.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Auto-assignment needs at least one class.
    #[error("invalid class count: {0} (at least 1 class is required)")]
    InvalidClassCount(usize),

    /// The class id is not present in the roster.
    #[error("unknown class: {0}")]
    UnknownClass(ClassId),

    /// The student id is not present in the roster.
    #[error("unknown student: {0}")]
    UnknownStudent(StudentId),

    /// A class with members cannot be removed.
    #[error("class {class_id} still has {count} student(s); move them out before removing it")]
    NonEmptyClass { class_id: ClassId, count: usize },

    /// Source and destination of a move are the same class.
    #[error("student(s) already in class {0}")]
    SameClass(ClassId),

    /// A moved student is not in the stated source class.
    #[error("student {student} is not in class {class_id}")]
    StudentNotInClass {
        student: StudentId,
        class_id: ClassId,
    },

    /// The same student was listed twice in one move.
    #[error("student {0} listed more than once in a move")]
    DuplicateStudent(StudentId),

    /// Detach requested for a student without a group.
    #[error("student {0} does not belong to a group")]
    NotGrouped(StudentId),

    /// No class id is left above the current maximum.
    #[error("cannot add a class after class {0}")]
    ClassIdExhausted(ClassId),

    /// A selection-based operation ran with no student selected.
    #[error("no student selected")]
    NoSelection,

    /// The operation needs a roster, but none has been built yet.
    #[error("no roster has been assigned yet")]
    NoRoster,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
