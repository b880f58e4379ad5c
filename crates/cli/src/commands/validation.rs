// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation flag commands

use super::update;
use crate::error::PcrError;
use crate::output::{self, OutputFormat};
use crate::state::StateFile;
use anyhow::Result;
use clap::ValueEnum;
use pcr_core::SelfCheckReport;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Serialize)]
#[serde(transparent)]
struct CheckView(SelfCheckReport);

impl fmt::Display for CheckView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.valid {
            return writeln!(f, "Self-check passed");
        }
        writeln!(f, "Self-check failed:")?;
        for issue in &self.0.issues {
            writeln!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}

pub fn flag(state: &StateFile, name: &str, verdict: Verdict, details: String) -> Result<()> {
    let passed = matches!(verdict, Verdict::Pass);
    let (tracker, ()) = update(state, |t| t.set_validation_flag(name, passed, details))?;

    let compliance = tracker.flags();
    println!(
        "{} {} ({}/{} passing)",
        name,
        if passed { "passed" } else { "failed" },
        compliance.passed_count(),
        compliance.len()
    );
    Ok(())
}

/// Run the self-check; an invalid result is reported as an error
pub fn check(state: &StateFile, format: OutputFormat) -> Result<()> {
    let (_, report) = update(state, |t| Ok(t.self_check()))?;
    let issues = report.issues.len();
    let valid = report.valid;

    output::print(&CheckView(report), format)?;
    if !valid {
        return Err(PcrError::check_failed(issues).into());
    }
    Ok(())
}
