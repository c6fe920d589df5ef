//! Group-first, gender-balancing greedy allocator.
//!
//! # Algorithm
//!
//! 1. **Group placement.** Cluster grouped students by `group_id`, sort the
//!    clusters by descending size (stable), and drop each whole cluster into
//!    the class with the fewest students (lowest id on ties). Groups are
//!    never split.
//! 2. **Individual placement.** Split ungrouped students into Male, Female,
//!    and Unknown pools, shuffle each pool, and process them in that order.
//!    Each student goes to the class minimizing `(same-gender count, size)`
//!    over the live roster, lowest id on ties.
//!
//! Grouping is a hard constraint; gender balance is a soft, greedily
//! minimized objective. Large groups are placed whole even when that skews
//! class sizes; there is no per-class cap.
//!
//! # Complexity
//! O(n · c · s) where n = students, c = classes, s = class size.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::info;

use crate::error::{Result, RosterError};
use crate::models::{ClassId, Gender, Roster, Student, StudentId};

/// One-shot batch allocator.
///
/// # Example
///
/// ```
/// use u_roster::assign::AutoAssigner;
/// use u_roster::models::{Gender, Student, StudentId};
///
/// let students = vec![
///     Student::new(StudentId(0), "A").with_gender(Gender::Female).with_group("G1"),
///     Student::new(StudentId(1), "B").with_gender(Gender::Female).with_group("G1"),
///     Student::new(StudentId(2), "C").with_gender(Gender::Male),
///     Student::new(StudentId(3), "D").with_gender(Gender::Male),
/// ];
///
/// let roster = AutoAssigner::new().assign_seeded(students, 2, 42).unwrap();
/// assert_eq!(roster.class_len(1), 3);
/// assert_eq!(roster.class_len(2), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoAssigner;

impl AutoAssigner {
    /// Creates a new assigner.
    pub fn new() -> Self {
        Self
    }

    /// Assigns `students` to classes `1..=class_count`.
    ///
    /// Every placed student gets both `current_class` and `initial_class`
    /// set to its class. `rng` drives the pool shuffles only.
    ///
    /// # Errors
    /// `InvalidClassCount` if `class_count < 1`; nothing is placed.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        students: Vec<Student>,
        class_count: usize,
        rng: &mut R,
    ) -> Result<Roster> {
        let count = u32::try_from(class_count)
            .ok()
            .filter(|&c| c >= 1)
            .ok_or(RosterError::InvalidClassCount(class_count))?;

        let mut roster = Roster::with_classes(count);
        let (grouped, ungrouped): (Vec<Student>, Vec<Student>) =
            students.into_iter().partition(Student::has_group);

        // Phase 1: whole groups, largest first
        let groups = cluster_groups(grouped);
        let group_total = groups.len();
        for members in groups {
            let target = least_populated(&roster);
            for student in members {
                place(&mut roster, student, target);
            }
        }

        // Phase 2: individuals, per gender pool
        let mut pools: [Vec<Student>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for student in ungrouped {
            let slot = match student.gender {
                Gender::Male => 0,
                Gender::Female => 1,
                Gender::Unknown => 2,
            };
            pools[slot].push(student);
        }
        for pool in &mut pools {
            pool.shuffle(rng);
        }
        for student in pools.into_iter().flatten() {
            let target = best_class_for(&roster, student.gender);
            place(&mut roster, student, target);
        }

        info!(
            classes = count,
            students = roster.student_count(),
            groups = group_total,
            "auto-assignment complete"
        );
        Ok(roster)
    }

    /// Assigns with a deterministic shuffle seeded from `seed`.
    pub fn assign_seeded(
        &self,
        students: Vec<Student>,
        class_count: usize,
        seed: u64,
    ) -> Result<Roster> {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        self.assign(students, class_count, &mut rng)
    }
}

fn place(roster: &mut Roster, mut student: Student, class_id: ClassId) {
    student.initial_class = Some(class_id);
    roster.place(student, class_id);
}

/// Clusters by group id in first-appearance order, then stable-sorts by
/// descending size.
fn cluster_groups(grouped: Vec<Student>) -> Vec<Vec<Student>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Student>> = Vec::new();
    for student in grouped {
        match index.get(&student.group_id) {
            Some(&i) => groups[i].push(student),
            None => {
                index.insert(student.group_id.clone(), groups.len());
                groups.push(vec![student]);
            }
        }
    }
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}

/// Class with the fewest students; lowest id wins ties.
fn least_populated(roster: &Roster) -> ClassId {
    roster
        .iter_classes()
        .min_by_key(|(_, ids)| ids.len())
        .map_or(1, |(id, _)| id)
}

/// Class minimizing `(count of gender, total size)`; lowest id wins ties.
fn best_class_for(roster: &Roster, gender: Gender) -> ClassId {
    roster
        .iter_classes()
        .min_by_key(|(_, ids)| (gender_count(roster, ids, gender), ids.len()))
        .map_or(1, |(id, _)| id)
}

fn gender_count(roster: &Roster, ids: &[StudentId], gender: Gender) -> usize {
    ids.iter()
        .filter_map(|id| roster.student(*id))
        .filter(|s| s.gender == gender)
        .count()
}
