// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod artifact;
pub mod inspect;
pub mod lifecycle;
pub mod record;
pub mod validation;

use crate::error::PcrError;
use crate::state::StateFile;
use anyhow::Result;
use pcr_core::{CycleTracker, PhaseStatus, TrackerError};

/// Load the tracker, apply `f` and save, even when `f` fails so the failure
/// stays in the tracker log
pub(crate) fn update<R>(
    state: &StateFile,
    f: impl FnOnce(&mut CycleTracker) -> Result<R, TrackerError>,
) -> Result<(CycleTracker, R)> {
    let mut tracker = state.load()?;
    let result = f(&mut tracker);
    state.save(&tracker)?;
    match result {
        Ok(value) => Ok((tracker, value)),
        Err(e) => Err(explain(e, &tracker)),
    }
}

/// Turn tracker errors into user-facing ones where there is advice to give
pub(crate) fn explain(err: TrackerError, tracker: &CycleTracker) -> anyhow::Error {
    match err {
        TrackerError::InvalidTransition { from, to, expected } => {
            PcrError::invalid_transition(from, to, expected).into()
        }
        TrackerError::UnknownFlag { name } => {
            PcrError::unknown_flag(&name, tracker.flags().names()).into()
        }
        TrackerError::UnexpectedStatus {
            phase,
            status,
            expected,
        } => {
            let err = PcrError::new(format!("Phase {} is {}", phase, status));
            let err = match expected {
                PhaseStatus::Failed => err
                    .with_context("Only a failed phase can be retried")
                    .with_suggestion("Mark it failed first: pcr fail --reason <REASON>"),
                _ => err
                    .with_context("Only an active phase can be failed or take artifacts")
                    .with_suggestion("Retry it: pcr retry"),
            };
            err.into()
        }
        TrackerError::InvalidMetric { name, value } => {
            PcrError::new(format!("Cannot record {} = {}", name, value))
                .with_context("Metric values must be finite numbers")
                .into()
        }
        other => other.into(),
    }
}
