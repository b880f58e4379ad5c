// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document (or no
//! document at all) yields the standard five-flag setup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Declaration of one validation flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Value the flag holds before anyone sets it
    #[serde(default)]
    pub initial: bool,
}

impl FlagDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            initial: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Name recorded in export metadata
    pub agent_id: String,
    /// Version string recorded in export metadata
    pub version: String,
    /// Ring buffer capacity for log entries
    pub max_log_entries: usize,
    /// How many of the most recent log entries an export carries
    pub export_log_limit: usize,
    /// Samples kept per metric name
    pub metric_history: usize,
    pub flags: Vec<FlagDef>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            agent_id: "pcr-cycle-tracker".to_string(),
            version: "1.1".to_string(),
            max_log_entries: 1000,
            export_log_limit: 100,
            metric_history: 100,
            flags: default_flags(),
        }
    }
}

fn default_flags() -> Vec<FlagDef> {
    vec![
        FlagDef::new("check_1", "Runtime and tooling confirmed"),
        FlagDef::new("check_2", "Seed intent restated"),
        FlagDef::new("check_3", "Phase selection logic"),
        FlagDef::new("check_4", "External validation handling"),
        FlagDef::new("check_5", "Artifact generation"),
    ]
}

impl TrackerConfig {
    /// Parse a configuration from TOML content and validate it
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_log_entries == 0 {
            return Err(ConfigError::Invalid("max_log_entries must be at least 1".into()));
        }
        if self.metric_history == 0 {
            return Err(ConfigError::Invalid("metric_history must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for flag in &self.flags {
            if flag.name.trim().is_empty() {
                return Err(ConfigError::Invalid("flag names must not be empty".into()));
            }
            if !seen.insert(flag.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate flag name: {}",
                    flag.name
                )));
            }
        }
        Ok(())
    }

    pub fn with_flags(mut self, flags: Vec<FlagDef>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = max;
        self
    }

    pub fn with_export_log_limit(mut self, limit: usize) -> Self {
        self.export_log_limit = limit;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
