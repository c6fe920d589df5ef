//! Roster balance statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Class size | Students in the class |
//! | Gender counts | Male / Female / Unknown per class |
//! | Gender spread | max − min count of a gender across classes |
//! | Manually moved | Students touched by any move |
//! | Duplicate names | Names appearing more than once in one class |
//! | Split groups | Groups spanning more than one class |

use serde::Serialize;

use crate::groups::{group_sizes, split_groups};
use crate::models::{ClassId, Gender, Roster};

/// Per-class counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub class_id: ClassId,
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub unknown: usize,
    pub manually_moved: usize,
    /// Names shared by two or more students in this class.
    pub duplicate_names: Vec<String>,
}

impl ClassStats {
    /// Computes counts for one class. Unknown classes yield zeros.
    pub fn calculate(roster: &Roster, class_id: ClassId) -> Self {
        let students = roster.students_in(class_id);
        let by = |g: Gender| students.iter().filter(|s| s.gender == g).count();
        Self {
            class_id,
            total: students.len(),
            male: by(Gender::Male),
            female: by(Gender::Female),
            unknown: by(Gender::Unknown),
            manually_moved: students.iter().filter(|s| s.is_manually_moved).count(),
            duplicate_names: roster.duplicate_names(class_id),
        }
    }

    /// Whether the class holds two students with the same name.
    pub fn has_duplicate_names(&self) -> bool {
        !self.duplicate_names.is_empty()
    }
}

/// Whole-roster summary.
#[derive(Debug, Clone, Serialize)]
pub struct RosterStats {
    /// Per-class stats in class id order.
    pub classes: Vec<ClassStats>,
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub unknown: usize,
    /// Largest difference in male count between any two classes.
    pub male_spread: usize,
    /// Largest difference in female count between any two classes.
    pub female_spread: usize,
    /// Distinct non-empty groups.
    pub group_count: usize,
    /// Groups whose members sit in more than one class.
    pub split_groups: Vec<String>,
}

impl RosterStats {
    /// Computes statistics for the whole roster.
    pub fn calculate(roster: &Roster) -> Self {
        let classes: Vec<ClassStats> = roster
            .class_ids()
            .into_iter()
            .map(|id| ClassStats::calculate(roster, id))
            .collect();

        let spread = |f: fn(&ClassStats) -> usize| {
            let max = classes.iter().map(f).max().unwrap_or(0);
            let min = classes.iter().map(f).min().unwrap_or(0);
            max - min
        };

        Self {
            total: classes.iter().map(|c| c.total).sum(),
            male: classes.iter().map(|c| c.male).sum(),
            female: classes.iter().map(|c| c.female).sum(),
            unknown: classes.iter().map(|c| c.unknown).sum(),
            male_spread: spread(|c| c.male),
            female_spread: spread(|c| c.female),
            group_count: group_sizes(roster).len(),
            split_groups: split_groups(roster).into_keys().collect(),
            classes,
        }
    }

    /// Total manually moved students.
    pub fn manually_moved(&self) -> usize {
        self.classes.iter().map(|c| c.manually_moved).sum()
    }
}
