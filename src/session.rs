//! Operator session: import → configure → assign → rebalance → export.
//!
//! A [`Session`] holds the imported student baseline, the live roster, and
//! the move orchestrator. It is the single writer for all roster
//! mutations.
//!
//! # Stages
//!
//! | Stage | Reached by | Roster |
//! |-------|-----------|--------|
//! | `Upload` | new session | none |
//! | `Config` | import without class hints, or reset | none |
//! | `Dashboard` | import with hints (restore), or auto-assign | live |

use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::assign::{has_class_hints, restore_from_hints, AutoAssigner, RosterStats};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::exchange::{export_rows, normalize_rows};
use crate::groups::group_count;
use crate::models::{ClassId, RawRow, Roster, Student, StudentId};
use crate::moves::{GroupMoveDecider, MoveOrchestrator, MoveOutcome};

/// Workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Upload,
    Config,
    Dashboard,
}

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImportOutcome {
    /// Rows carried class hints; the roster was rebuilt from them.
    Restored { students: usize, classes: usize },
    /// No hints; waiting for a class count and auto-assignment.
    AwaitingAssignment { students: usize, groups: usize },
}

/// One operator's editing session.
#[derive(Debug, Clone)]
pub struct Session {
    config: RosterConfig,
    stage: Stage,
    students: Vec<Student>,
    roster: Option<Roster>,
    orchestrator: MoveOrchestrator,
}

impl Session {
    /// Creates an empty session.
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            stage: Stage::Upload,
            students: Vec::new(),
            roster: None,
            orchestrator: MoveOrchestrator::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Imported students (baseline for re-assignment).
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// The live roster, if one has been built.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    fn roster_mut(&mut self) -> Result<&mut Roster> {
        self.roster.as_mut().ok_or(RosterError::NoRoster)
    }

    /// Replaces the session contents with imported rows.
    ///
    /// If any row carries an assigned-class hint the roster is restored
    /// directly and the session moves to `Dashboard`; otherwise it waits in
    /// `Config` for [`auto_assign`](Self::auto_assign).
    pub fn import(&mut self, rows: &[RawRow]) -> ImportOutcome {
        let normalized = normalize_rows(rows);
        self.orchestrator.clear_selection();
        self.students = normalized.iter().map(|r| r.student.clone()).collect();

        if has_class_hints(&normalized) {
            let roster = restore_from_hints(normalized);
            self.config.class_count = roster.class_count().max(1);
            let outcome = ImportOutcome::Restored {
                students: roster.student_count(),
                classes: roster.class_count(),
            };
            self.roster = Some(roster);
            self.stage = Stage::Dashboard;
            outcome
        } else {
            self.roster = None;
            self.stage = Stage::Config;
            ImportOutcome::AwaitingAssignment {
                students: self.students.len(),
                groups: group_count(&self.students),
            }
        }
    }

    /// Sets the class count used by the next auto-assignment.
    pub fn set_class_count(&mut self, count: usize) -> Result<()> {
        if count < 1 {
            warn!(count, "rejected class count");
            return Err(RosterError::InvalidClassCount(count));
        }
        self.config.class_count = count;
        Ok(())
    }

    /// Runs auto-assignment over the imported students with `rng`.
    pub fn auto_assign<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Roster> {
        let roster =
            AutoAssigner::new().assign(self.students.clone(), self.config.class_count, rng)?;
        self.orchestrator.refresh_selection(&roster);
        self.stage = Stage::Dashboard;
        Ok(self.roster.insert(roster))
    }

    /// Runs auto-assignment using the configured seed, or OS entropy.
    pub fn auto_assign_configured(&mut self) -> Result<&Roster> {
        match self.config.seed {
            Some(seed) => {
                let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
                self.auto_assign(&mut rng)
            }
            None => self.auto_assign(&mut rand::rng()),
        }
    }

    /// Drops the roster and returns to configuration.
    ///
    /// Note edits survive; moves and detaches do not.
    pub fn reset_to_config(&mut self) {
        self.roster = None;
        self.orchestrator.clear_selection();
        self.stage = Stage::Config;
        info!("session reset to configuration");
    }

    /// Opens a student's detail projection.
    pub fn select(&mut self, id: StudentId) -> Result<&Student> {
        let roster = self.roster.as_ref().ok_or(RosterError::NoRoster)?;
        self.orchestrator.select(roster, id)
    }

    /// The open student, kept in sync with the roster.
    pub fn selected(&self) -> Option<&Student> {
        self.orchestrator.selected()
    }

    /// Closes the detail projection.
    pub fn clear_selection(&mut self) {
        self.orchestrator.clear_selection();
    }

    /// Moves a student (drag entry point).
    pub fn move_student<D>(
        &mut self,
        id: StudentId,
        to: ClassId,
        decider: &mut D,
    ) -> Result<MoveOutcome>
    where
        D: GroupMoveDecider + ?Sized,
    {
        let roster = self.roster.as_mut().ok_or(RosterError::NoRoster)?;
        self.orchestrator.move_student(roster, id, to, decider)
    }

    /// Moves the open student (list entry point).
    pub fn move_selected<D>(&mut self, to: ClassId, decider: &mut D) -> Result<MoveOutcome>
    where
        D: GroupMoveDecider + ?Sized,
    {
        let roster = self.roster.as_mut().ok_or(RosterError::NoRoster)?;
        self.orchestrator.move_selected(roster, to, decider)
    }

    /// Replaces a student's note in the roster and in the baseline.
    pub fn set_note(&mut self, id: StudentId, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(RosterError::UnknownStudent(id))?;
        if let Some(roster) = self.roster.as_mut() {
            roster.set_note(id, text.clone())?;
        }
        self.students[index].note = text;
        if let Some(roster) = self.roster.as_ref() {
            self.orchestrator.refresh_selection(roster);
        }
        Ok(())
    }

    /// Frees a student from its group without moving it.
    pub fn detach_group(&mut self, id: StudentId) -> Result<()> {
        let roster = self.roster.as_mut().ok_or(RosterError::NoRoster)?;
        roster.detach_group(id)?;
        self.orchestrator.refresh_selection(roster);
        Ok(())
    }

    /// Adds an empty class.
    pub fn add_class(&mut self) -> Result<ClassId> {
        self.roster_mut()?.add_class()
    }

    /// Removes an empty class.
    pub fn remove_class(&mut self, class_id: ClassId) -> Result<()> {
        self.roster_mut()?.remove_class(class_id)
    }

    /// Balance statistics for the live roster.
    pub fn stats(&self) -> Result<RosterStats> {
        let roster = self.roster.as_ref().ok_or(RosterError::NoRoster)?;
        Ok(RosterStats::calculate(roster))
    }

    /// Export rows for the live roster.
    pub fn export_rows(&self) -> Result<Vec<RawRow>> {
        let roster = self.roster.as_ref().ok_or(RosterError::NoRoster)?;
        Ok(export_rows(roster, &self.config))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}
