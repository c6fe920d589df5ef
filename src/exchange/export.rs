//! Export: roster snapshot → one row per student.
//!
//! Each row starts from the student's original import columns and
//! overwrites the placement fields. Rows are ordered by class id, then by
//! name under the Unicode Collation Algorithm (CLDR root order), so case
//! and accents do not push names out of alphabetical position.

use feruca::Collator;

use super::columns;
use crate::config::RosterConfig;
use crate::models::{Gender, RawRow, Roster, Student};

/// Formats a class id for the assigned-class column (`3` → `"3반"`).
pub fn format_class(class_id: u32, suffix: &str) -> String {
    format!("{class_id}{suffix}")
}

fn export_row(student: &Student, class_id: u32, config: &RosterConfig) -> RawRow {
    let gender = match student.gender {
        Gender::Unknown if !student.gender_text.trim().is_empty() => student.gender_text.clone(),
        g => g.label().to_string(),
    };
    let manual = if student.is_manually_moved {
        config.manual_move_marker.clone()
    } else {
        String::new()
    };

    let mut row = student.original.clone();
    row.set(
        columns::OUT_ASSIGNED_CLASS,
        format_class(class_id, &config.class_suffix),
    );
    row.set(columns::OUT_NAME, student.name.clone());
    row.set(columns::OUT_GENDER, gender);
    row.set(columns::OUT_NOTE, student.note.clone());
    row.set(columns::OUT_GROUP_ID, student.group_id.clone());
    row.set(columns::OUT_MANUAL_MOVE, manual);
    row
}

/// Produces export rows for every placed student.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::exchange::export_rows;
/// use u_roster::models::Roster;
///
/// let rows = export_rows(&Roster::new(), &RosterConfig::default());
/// assert!(rows.is_empty());
/// ```
pub fn export_rows(roster: &Roster, config: &RosterConfig) -> Vec<RawRow> {
    let mut placed: Vec<(u32, &Student)> = roster
        .iter_classes()
        .flat_map(move |(class_id, ids)| {
            ids.iter()
                .filter_map(move |id| roster.student(*id))
                .map(move |s| (class_id, s))
        })
        .collect();
    let mut collator = Collator::default();
    placed.sort_by(|(ca, a), (cb, b)| {
        ca.cmp(cb)
            .then_with(|| collator.collate(a.name.as_str(), b.name.as_str()))
    });

    placed
        .into_iter()
        .map(|(class_id, s)| export_row(s, class_id, config))
        .collect()
}
