// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Intent and metric commands

use super::update;
use crate::state::StateFile;
use anyhow::Result;
use std::time::Duration;

pub fn intent(state: &StateFile, text: String) -> Result<()> {
    let (_, echoed) = update(state, |t| Ok(t.mirror_intent(text)))?;
    println!("{}", echoed);
    Ok(())
}

pub fn metric(state: &StateFile, name: &str, value: f64) -> Result<()> {
    let (tracker, ()) = update(state, |t| t.record_metric(name, value))?;
    println!(
        "Recorded {} = {} in {}",
        name,
        value,
        tracker.current_phase()
    );
    Ok(())
}

pub fn cleanup(state: &StateFile, max_age_hours: u64) -> Result<()> {
    let max_age = Duration::from_secs(max_age_hours.saturating_mul(60 * 60));
    let (_, removed) = update(state, |t| Ok(t.cleanup(max_age)))?;
    println!(
        "Removed {} metric sample(s) older than {}h",
        removed, max_age_hours
    );
    Ok(())
}
