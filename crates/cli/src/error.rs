// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error says what went wrong (message), why it might have happened
//! (context) and how to fix it (suggestions).

use pcr_core::Phase;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct PcrError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PcrError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for PcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for PcrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures users run into
impl PcrError {
    pub fn not_initialized(path: &Path) -> Self {
        PcrError::new(format!("No tracker state at '{}'", path.display()))
            .with_context("Every command except init needs an existing state file")
            .with_suggestion("Create one: pcr init")
            .with_suggestion("Use another file: pcr --state <PATH> status")
    }

    pub fn already_initialized(path: &Path) -> Self {
        PcrError::new(format!("Tracker state already exists at '{}'", path.display()))
            .with_suggestion("Inspect it: pcr status")
            .with_suggestion("Discard it and start over: pcr init --force")
    }

    pub fn corrupt_state(path: &Path, reason: impl fmt::Display) -> Self {
        PcrError::new(format!("Tracker state at '{}' is unreadable", path.display()))
            .with_context(reason.to_string())
            .with_suggestion(format!("Inspect the file: cat {}", path.display()))
            .with_suggestion("Discard it and start over: pcr init --force")
    }

    pub fn invalid_transition(from: Phase, to: Phase, expected: Phase) -> Self {
        PcrError::new(format!("Cannot move from {} to {}", from, to))
            .with_context(format!("{} hands over to {} only", from, expected))
            .with_suggestion("Advance to the next phase: pcr next")
            .with_suggestion("Check where the cycle stands: pcr status")
    }

    pub fn unknown_flag<'a>(name: &str, declared: impl IntoIterator<Item = &'a str>) -> Self {
        let declared: Vec<&str> = declared.into_iter().collect();
        PcrError::new(format!("Unknown validation flag '{}'", name))
            .with_context(format!("Declared flags: {}", declared.join(", ")))
            .with_suggestion("Declare extra flags in the config file passed with --config")
    }

    pub fn check_failed(issues: usize) -> Self {
        let noun = if issues == 1 { "issue" } else { "issues" };
        PcrError::new(format!("Self-check found {} {}", issues, noun))
            .with_suggestion("Set passing flags: pcr flag <NAME> pass")
            .with_suggestion("Register an artifact for the current phase: pcr artifact <KIND> <ID>")
    }
}
