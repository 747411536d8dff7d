//! Configuration for a playthrough.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FictionError, FictionResult};

/// How a `required_flags` entry of `false` treats a flag that was never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagPolicy {
    /// A missing flag reads as `false`, so "not done yet" requirements hold
    /// until the flag is written.
    #[default]
    AbsentIsFalse,
    /// A requirement only holds if the flag was written with exactly that
    /// value; a missing flag fails every requirement.
    Strict,
}

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours on the clock when the investigation begins.
    pub initial_time: i32,
    /// Treatment of unset flags in choice requirements.
    pub flag_policy: FlagPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_time: 24,
            flag_policy: FlagPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> FictionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> FictionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| FictionError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the starting time budget.
    pub fn with_initial_time(mut self, hours: i32) -> Self {
        self.initial_time = hours;
        self
    }

    /// Set the flag policy.
    pub fn with_flag_policy(mut self, policy: FlagPolicy) -> Self {
        self.flag_policy = policy;
        self
    }
}
