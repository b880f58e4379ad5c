// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tracker operations

use crate::config::ConfigError;
use crate::phase::{Phase, PhaseStatus};
use thiserror::Error;

/// Errors returned by tracker operations.
///
/// All of them are local and recoverable: a failed call leaves the tracker
/// exactly as it was, apart from the log entry describing the failure.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("cannot transition from {from} to {to} (expected {expected})")]
    InvalidTransition {
        from: Phase,
        to: Phase,
        expected: Phase,
    },

    #[error("unknown validation flag: {name}")]
    UnknownFlag { name: String },

    #[error("phase {phase} is {status}, expected {expected}")]
    UnexpectedStatus {
        phase: Phase,
        status: PhaseStatus,
        expected: PhaseStatus,
    },

    #[error("artifact {0} must not be empty")]
    InvalidArtifact(&'static str),

    #[error("metric {name} must be a finite number, got {value}")]
    InvalidMetric { name: String, value: f64 },

    #[error("corrupt state: {0}")]
    CorruptState(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
