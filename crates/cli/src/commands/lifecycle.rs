// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase lifecycle commands: init, advance, next, fail, retry

use super::update;
use crate::state::StateFile;
use anyhow::Result;
use pcr_core::Phase;

pub fn init(state: &StateFile, force: bool) -> Result<()> {
    let tracker = state.init(force)?;
    println!(
        "Initialized tracker {} at {}",
        tracker.tracker_id(),
        state.path().display()
    );
    println!("Current phase: {}", tracker.current_phase());
    Ok(())
}

/// Move to `target`, or to the successor of the current phase when `None`
pub fn advance(state: &StateFile, target: Option<Phase>) -> Result<()> {
    let (tracker, (from, to)) = update(state, |t| {
        let from = t.current_phase();
        let to = match target {
            Some(phase) => t.transition(phase).map(|()| phase)?,
            None => t.advance()?,
        };
        Ok((from, to))
    })?;

    println!("{} → {}", from, to);
    if to == Phase::FIRST {
        println!(
            "Cycle complete ({} so far), now in {}",
            tracker.cycle_count(),
            tracker.cycle_id()
        );
    }
    Ok(())
}

pub fn fail(state: &StateFile, reason: String) -> Result<()> {
    let (tracker, ()) = update(state, |t| t.fail_phase(reason))?;
    println!("Marked {} as failed", tracker.current_phase());
    Ok(())
}

pub fn retry(state: &StateFile) -> Result<()> {
    let (tracker, ()) = update(state, |t| t.retry_phase())?;
    println!("Retrying {}", tracker.current_phase());
    Ok(())
}
