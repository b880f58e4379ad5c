// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views of tracker state: snapshots, exports and reports

use crate::id::{CycleId, TrackerId};
use crate::log::LogEntry;
use crate::metrics::MetricSample;
use crate::phase::{Phase, PhaseRecord, PhaseStatus};
use crate::validation::FlagSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned copy of the tracker's state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tracker_id: TrackerId,
    pub cycle_id: CycleId,
    /// Laps completed so far
    pub cycle_count: u64,
    pub current_phase: Phase,
    pub phases: BTreeMap<Phase, PhaseRecord>,
    pub validation: FlagSet,
    pub total_artifacts: usize,
    #[serde(default)]
    pub last_intent: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl StateSnapshot {
    pub fn record(&self, phase: Phase) -> Option<&PhaseRecord> {
        self.phases.get(&phase)
    }

    pub fn active_phases(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .filter(|(_, r)| r.status == PhaseStatus::Active)
            .map(|(p, _)| *p)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMeta {
    pub tracker_id: TrackerId,
    pub agent_id: String,
    pub version: String,
    pub exported_at: DateTime<Utc>,
}

/// Serializable bundle of everything needed to inspect or restore a tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub meta: ExportMeta,
    pub state: StateSnapshot,
    /// Most recent log entries, oldest first
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub metrics: BTreeMap<String, Vec<MetricSample>>,
}

/// Result of a self-check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfCheckReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl SelfCheckReport {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Progress analysis across the current state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_count: u64,
    /// Phases whose record is currently completed
    pub completed_phases: usize,
    pub total_artifacts: usize,
    /// Fraction of validation flags passing
    pub compliance: f64,
    pub improvements: Vec<String>,
}
