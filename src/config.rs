//! Engine configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default.
//!
//! ```
//! use u_roster::config::RosterConfig;
//!
//! let config = RosterConfig::from_json_str(r#"{ "class_count": 5, "seed": 7 }"#).unwrap();
//! assert_eq!(config.class_count, 5);
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.class_suffix, "반");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Assignment and export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Number of classes for auto-assignment.
    pub class_count: usize,
    /// Suffix appended to class ids on export (`3` → `3반`).
    pub class_suffix: String,
    /// Marker written for manually moved students on export.
    pub manual_move_marker: String,
    /// Fixed seed for the shuffle. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            class_count: 3,
            class_suffix: "반".to_string(),
            manual_move_marker: "O".to_string(),
            seed: None,
        }
    }
}

impl RosterConfig {
    /// Parses configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the class count.
    pub fn with_class_count(mut self, count: usize) -> Self {
        self.class_count = count;
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = RosterConfig::default();
        assert_eq!(c.class_count, 3);
        assert_eq!(c.manual_move_marker, "O");
        assert_eq!(c.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let c = RosterConfig::from_json_str(r#"{ "class_suffix": "" }"#).unwrap();
        assert_eq!(c.class_suffix, "");
        assert_eq!(c.class_count, 3);
    }

    #[test]
    fn test_bad_json() {
        let err = RosterConfig::from_json_str("{ class_count: ").unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "class_count": 4, "manual_move_marker": "Y" }}"#).unwrap();
        let c = RosterConfig::load(file.path()).unwrap();
        let expected = RosterConfig {
            manual_move_marker: "Y".into(),
            ..RosterConfig::default().with_class_count(4)
        };
        assert_eq!(c, expected);
    }
}
