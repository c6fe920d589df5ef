//! Initial roster construction and balance metrics.
//!
//! Two ways to build a roster from normalized rows:
//!
//! - [`AutoAssigner`]: group-first, gender-balancing greedy allocation.
//! - [`restore_from_hints`]: rebuild from assigned-class hints already
//!   present in the import (bypasses the allocator).
//!
//! [`RosterStats`] summarizes class sizes, gender spread, and group
//! integrity for any roster.

mod auto;
mod restore;
mod stats;

pub use auto::AutoAssigner;
pub use restore::{has_class_hints, restore_from_hints};
pub use stats::{ClassStats, RosterStats};
