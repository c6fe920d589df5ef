//! Cohesion group index.
//!
//! Groups are derived, never stored: `group(g) = { s : s.group_id == g }`.
//! All queries are pure reads over the current roster snapshot.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ClassId, Roster, Student, StudentId};

/// Students sharing `group_id` who currently sit in `class_id`.
///
/// `exclude` drops one student (usually the one being moved) from the
/// result. Runs in O(class size).
///
/// # Example
///
/// ```
/// use u_roster::groups::members_of;
/// use u_roster::models::{Roster, Student, StudentId};
/// use u_roster::assign::AutoAssigner;
/// use rand::SeedableRng;
///
/// let students = vec![
///     Student::new(StudentId(0), "A").with_group("G1"),
///     Student::new(StudentId(1), "B").with_group("G1"),
/// ];
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
/// let roster = AutoAssigner::new().assign(students, 2, &mut rng).unwrap();
///
/// let mates = members_of(&roster, "G1", 1, Some(StudentId(0)));
/// assert_eq!(mates.len(), 1);
/// assert_eq!(mates[0].id, StudentId(1));
/// ```
pub fn members_of<'a>(
    roster: &'a Roster,
    group_id: &str,
    class_id: ClassId,
    exclude: Option<StudentId>,
) -> Vec<&'a Student> {
    let group_id = group_id.trim();
    if group_id.is_empty() {
        return Vec::new();
    }
    roster
        .students_in(class_id)
        .into_iter()
        .filter(|s| Some(s.id) != exclude && s.group_id == group_id)
        .collect()
}

/// Member count of every group in the roster.
pub fn group_sizes(roster: &Roster) -> BTreeMap<String, usize> {
    let mut sizes = BTreeMap::new();
    for s in roster.students().filter(|s| s.has_group()) {
        *sizes.entry(s.group_id.clone()).or_insert(0) += 1;
    }
    sizes
}

/// Number of distinct non-empty groups among `students`.
pub fn group_count<'a>(students: impl IntoIterator<Item = &'a Student>) -> usize {
    students
        .into_iter()
        .filter(|s| s.has_group())
        .map(|s| s.group_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Groups whose members occupy more than one class, with the classes
/// they span.
pub fn split_groups(roster: &Roster) -> BTreeMap<String, BTreeSet<ClassId>> {
    let mut spans: BTreeMap<String, BTreeSet<ClassId>> = BTreeMap::new();
    for (class_id, ids) in roster.iter_classes() {
        for s in ids.iter().filter_map(|id| roster.student(*id)) {
            if s.has_group() {
                spans.entry(s.group_id.clone()).or_default().insert(class_id);
            }
        }
    }
    spans.retain(|_, classes| classes.len() > 1);
    spans
}
