// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation flags
//!
//! A fixed set of named boolean gates. The set is established from config when
//! the tracker is built; callers can flip values but never add or drop names.

use crate::config::FlagDef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFlag {
    pub description: String,
    pub passed: bool,
    /// Details supplied with the last explicit update
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The fixed set of flags, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
    flags: BTreeMap<String, ValidationFlag>,
}

impl FlagSet {
    pub fn from_defs(defs: &[FlagDef]) -> Self {
        let flags = defs
            .iter()
            .map(|def| {
                (
                    def.name.clone(),
                    ValidationFlag {
                        description: def.description.clone(),
                        passed: def.initial,
                        details: None,
                        updated_at: None,
                    },
                )
            })
            .collect();
        Self { flags }
    }

    pub fn get(&self, name: &str) -> Option<&ValidationFlag> {
        self.flags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Update a declared flag. Returns false if the name is not declared.
    pub(crate) fn set(
        &mut self,
        name: &str,
        passed: bool,
        details: Option<String>,
        now: DateTime<Utc>,
    ) -> bool {
        match self.flags.get_mut(name) {
            Some(flag) => {
                flag.passed = passed;
                flag.details = details;
                flag.updated_at = Some(now);
                true
            }
            None => false,
        }
    }

    /// Copy a persisted flag's value onto a declared flag, keeping the declared
    /// description. Returns false if the name is not declared.
    pub(crate) fn restore(&mut self, name: &str, saved: &ValidationFlag) -> bool {
        match self.flags.get_mut(name) {
            Some(flag) => {
                flag.passed = saved.passed;
                flag.details = saved.details.clone();
                flag.updated_at = saved.updated_at;
                true
            }
            None => false,
        }
    }

    /// Names of flags currently false, in name order
    pub fn failing(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, flag)| !flag.passed)
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationFlag)> {
        self.flags.iter().map(|(name, flag)| (name.as_str(), flag))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.flags.values().filter(|f| f.passed).count()
    }

    /// Fraction of flags currently passing; an empty set counts as fully compliant
    pub fn compliance(&self) -> f64 {
        if self.flags.is_empty() {
            1.0
        } else {
            self.passed_count() as f64 / self.flags.len() as f64
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
