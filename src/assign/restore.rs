//! Restore path: rebuild a roster from assigned-class hints.
//!
//! When any imported row already names its class, auto-assignment is
//! skipped and the roster is reconstructed from the hints directly. Rows
//! without a usable hint (absent or `0`) land in class 1.

use tracing::info;

use crate::exchange::NormalizedRow;
use crate::models::{ClassId, Roster};

/// Whether any row carries a class hint.
pub fn has_class_hints(rows: &[NormalizedRow]) -> bool {
    rows.iter().any(|r| r.class_hint.is_some())
}

/// Rebuilds a roster from class hints.
///
/// Classes are created for each distinct target and ordered by id; within
/// a class students keep import order. `initial_class` is set to the
/// target. The imported manual-move flag is preserved.
pub fn restore_from_hints(rows: Vec<NormalizedRow>) -> Roster {
    let mut roster = Roster::new();
    for row in rows {
        let target: ClassId = row.class_hint.filter(|&c| c >= 1).unwrap_or(1);
        let mut student = row.student;
        student.initial_class = Some(target);
        roster.place(student, target);
    }
    info!(
        classes = roster.class_count(),
        students = roster.student_count(),
        "roster restored from class hints"
    );
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::normalize_rows;
    use crate::models::{RawRow, StudentId};

    fn rows() -> Vec<NormalizedRow> {
        normalize_rows(&[
            RawRow::new().with("성명", "가").with("배정반", "3반"),
            RawRow::new().with("성명", "나").with("배정반", "1반"),
            RawRow::new().with("성명", "다"),
            RawRow::new()
                .with("성명", "라")
                .with("배정반", "3")
                .with("수동이동", "O"),
            RawRow::new().with("성명", "마").with("배정반", "0반"),
        ])
    }

    #[test]
    fn test_detects_hints() {
        assert!(has_class_hints(&rows()));
        let plain = normalize_rows(&[RawRow::new().with("성명", "가")]);
        assert!(!has_class_hints(&plain));
    }

    #[test]
    fn test_restore_groups_by_hint() {
        let roster = restore_from_hints(rows());
        assert_eq!(roster.class_ids(), vec![1, 3]);
        assert_eq!(
            roster.student_ids_in(1).unwrap(),
            &[StudentId(1), StudentId(2), StudentId(4)]
        );
        assert_eq!(roster.student_ids_in(3).unwrap(), &[StudentId(0), StudentId(3)]);

        let da = roster.student(StudentId(2)).unwrap();
        assert_eq!(da.initial_class, Some(1));
        assert_eq!(da.current_class, Some(1));

        let ra = roster.student(StudentId(3)).unwrap();
        assert!(ra.is_manually_moved);
        assert_eq!(ra.initial_class, Some(3));
    }
}
