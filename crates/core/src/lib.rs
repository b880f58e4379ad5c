// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! pcr-core: phase cycle tracker
//!
//! This crate provides:
//! - The five-phase cyclic state machine with per-phase records and artifacts
//! - Named validation flags and a self-check over them
//! - A bounded log buffer, metric series and serializable snapshots
//! - Collaborator traits for log sinks and state stores

pub mod clock;
pub mod id;

pub mod artifact;
pub mod config;
pub mod error;
pub mod log;
pub mod metrics;
pub mod phase;
pub mod validation;

pub mod sink;
pub mod snapshot;
pub mod store;

pub mod shared;
pub mod tracker;

// Re-exports
pub use artifact::{Artifact, ArtifactFilter};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, FlagDef, TrackerConfig};
pub use error::TrackerError;
pub use id::{ArtifactId, CycleId, IdGen, SequentialIdGen, TrackerId, UuidIdGen};
pub use log::{LogBuffer, LogEntry, LogLevel};
pub use metrics::{MetricSample, MetricSummary};
pub use phase::{ParsePhaseError, Phase, PhaseRecord, PhaseStatus};
pub use shared::SharedTracker;
pub use sink::{LogSink, SinkError};
pub use snapshot::{CycleReport, ExportBundle, ExportMeta, SelfCheckReport, StateSnapshot};
pub use store::{StateStore, StoreError};
pub use tracker::{CycleTracker, DEFAULT_METRIC_MAX_AGE};
pub use validation::{FlagSet, ValidationFlag};
