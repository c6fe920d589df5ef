//! Class assignment engine.
//!
//! Partitions an imported student list into classes while keeping named
//! cohesion groups together and balancing gender, then lets an operator
//! rebalance the result one move at a time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Gender`, `Roster`, `RawRow`
//! - **`exchange`**: Row normalization, export, and a CSV adapter
//! - **`groups`**: Derived cohesion-group queries
//! - **`assign`**: Auto-assignment, restore-from-hints, balance statistics
//! - **`moves`**: Group-aware move protocol with an operator decision gate
//! - **`session`**: Import → configure → assign → rebalance → export workflow
//! - **`validation`**: Roster integrity checks
//! - **`config`**, **`error`**, **`logging`**: Ambient plumbing
//!
//! # Invariants
//!
//! - Every student sits in exactly one class.
//! - Mutations are atomic: a rejected call changes nothing.
//! - Auto-assignment never splits a group; only an explicit operator
//!   decision can detach a student from its group.

pub mod assign;
pub mod config;
pub mod error;
pub mod exchange;
pub mod groups;
pub mod logging;
pub mod models;
pub mod moves;
pub mod session;
pub mod validation;

pub use error::{Result, RosterError};
