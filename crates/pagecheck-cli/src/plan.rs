//! Plan files: scenarios described in JSON or TOML instead of code.
//!
//! ```toml
//! [[scenario]]
//! name = "contact"
//!
//! [[scenario.steps]]
//! step = "open"
//! path = "/contact"
//!
//! [[scenario.steps]]
//! step = "await_ready"
//! condition = "network_idle"
//!
//! [[scenario.steps]]
//! step = "assert_content"
//! text = "メッセージを送る"
//! ```
//!
//! The JSON form is `{"scenarios": [{"name": ..., "steps": [...]}]}`.

use crate::error::{CliError, Result};
use pagecheck_browser::Scenario;
use serde::Deserialize;
use std::path::Path;

/// The scenarios of one plan file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plan {
    /// Scenarios in file order
    #[serde(alias = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl Plan {
    /// Reads a plan, choosing the format by extension (`.toml`, otherwise JSON).
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing file, `InvalidPlan` for a file
    /// that doesn't parse or holds a malformed scenario.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CliError::FileNotFound(path.to_path_buf()),
            _ => CliError::Io(e),
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let plan = if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
        .map_err(|reason| CliError::InvalidPlan {
            path: path.to_path_buf(),
            reason,
        })?;

        plan.check().map_err(|reason| CliError::InvalidPlan {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(plan)
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    fn from_json(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.scenarios.is_empty() {
            return Err("plan contains no scenarios".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(format!("scenario '{}' is defined twice", scenario.name));
            }
            scenario.validate()?;
        }
        Ok(())
    }

    /// Looks up a scenario by name.
    pub fn find(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}
