//! Student model.
//!
//! A student is created once per import and afterwards only relocated
//! between classes. Identity is the [`StudentId`] assigned at import time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RawRow;

/// Class identifier. Positive; ids may become sparse after removals.
pub type ClassId = u32;

/// Opaque student identity, assigned from the import row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub usize);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "student-{}", self.0)
    }
}

/// Normalized gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// Missing, ambiguous, or unrecognized input.
    Unknown,
}

impl Gender {
    /// Display label used on export.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
            Gender::Unknown => "미상",
        }
    }
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Stable identity.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Normalized gender.
    pub gender: Gender,
    /// Gender text as imported (kept for export of unrecognized values).
    pub gender_text: String,
    /// Cohesion group. Empty = no constraint.
    pub group_id: String,
    /// Previous class (display only).
    pub prior_class: String,
    /// Previous grade (display only).
    pub prior_grade: String,
    /// Previous roll number (display only).
    pub prior_number: String,
    /// Birth date text (display only).
    pub birth: String,
    /// Operator note; audit fragments are appended here.
    pub note: String,
    /// Placement from the last automatic assignment or restore.
    /// Never touched by manual moves.
    pub initial_class: Option<ClassId>,
    /// Authoritative current placement. `None` until placed in a roster.
    pub current_class: Option<ClassId>,
    /// Set once any move touches this student; never cleared.
    pub is_manually_moved: bool,
    /// Import columns, re-emitted on export.
    pub original: RawRow,
}

impl Student {
    /// Creates an unplaced student with the given id and name.
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gender: Gender::Unknown,
            gender_text: String::new(),
            group_id: String::new(),
            prior_class: String::new(),
            prior_grade: String::new(),
            prior_number: String::new(),
            birth: String::new(),
            note: String::new(),
            initial_class: None,
            current_class: None,
            is_manually_moved: false,
            original: RawRow::new(),
        }
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the cohesion group (surrounding whitespace is dropped).
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        self.group_id = group_id.trim().to_string();
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the initial (baseline) class.
    pub fn with_initial_class(mut self, class_id: ClassId) -> Self {
        self.initial_class = Some(class_id);
        self
    }

    /// Whether the student carries a cohesion constraint.
    pub fn has_group(&self) -> bool {
        !self.group_id.is_empty()
    }

    /// Whether the student now sits somewhere other than its baseline class.
    pub fn is_displaced(&self) -> bool {
        match (self.initial_class, self.current_class) {
            (Some(initial), Some(current)) => initial != current,
            _ => false,
        }
    }

    /// Appends an audit fragment to the note.
    pub(crate) fn append_note(&mut self, fragment: &str) {
        self.note = format!("{} {}", self.note, fragment).trim().to_string();
    }
}
