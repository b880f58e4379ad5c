// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase definitions and per-phase records

use crate::artifact::Artifact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One stage of the cycle.
///
/// The order is fixed: Planner → Maker → Checker → Reflector → Orchestrator,
/// and the Orchestrator hands back to the Planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Planner,
    Maker,
    Checker,
    Reflector,
    Orchestrator,
}

impl Phase {
    /// Every phase, in cycle order
    pub const ALL: [Phase; 5] = [
        Phase::Planner,
        Phase::Maker,
        Phase::Checker,
        Phase::Reflector,
        Phase::Orchestrator,
    ];

    /// The phase a fresh tracker starts in, and the phase each lap wraps back to
    pub const FIRST: Phase = Phase::Planner;

    /// The designated successor of this phase
    pub fn next(self) -> Phase {
        match self {
            Phase::Planner => Phase::Maker,
            Phase::Maker => Phase::Checker,
            Phase::Checker => Phase::Reflector,
            Phase::Reflector => Phase::Orchestrator,
            Phase::Orchestrator => Phase::Planner,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Planner => "PLANNER",
            Phase::Maker => "MAKER",
            Phase::Checker => "CHECKER",
            Phase::Reflector => "REFLECTOR",
            Phase::Orchestrator => "ORCHESTRATOR",
        }
    }

    /// Position of this phase within the cycle (0-based)
    pub fn index(self) -> usize {
        match self {
            Phase::Planner => 0,
            Phase::Maker => 1,
            Phase::Checker => 2,
            Phase::Reflector => 3,
            Phase::Orchestrator => 4,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phase: {0}")]
pub struct ParsePhaseError(pub String);

impl FromStr for Phase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}

/// Status of a phase record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    /// Not yet reached in this lap
    Pending,
    /// The phase the tracker is currently in
    Active,
    /// Left through a transition
    Completed,
    /// Marked failed while active
    Failed,
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseStatus::Pending => write!(f, "pending"),
            PhaseStatus::Active => write!(f, "active"),
            PhaseStatus::Completed => write!(f, "completed"),
            PhaseStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Everything the tracker knows about one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub status: PhaseStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub artifacts: Vec<Artifact>,
    /// Number of times this phase went from active to completed
    #[serde(default)]
    pub completions: u32,
    /// Failure reason while the record is failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhaseRecord {
    pub fn pending() -> Self {
        Self {
            status: PhaseStatus::Pending,
            started_at: None,
            ended_at: None,
            artifacts: Vec::new(),
            completions: 0,
            error: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PhaseStatus::Active
    }

    pub(crate) fn activate(&mut self, now: DateTime<Utc>) {
        self.status = PhaseStatus::Active;
        self.started_at = Some(now);
        self.ended_at = None;
        self.error = None;
    }

    /// Close the record on the way out of the phase.
    ///
    /// A failed record stays failed; its end time was set when it failed.
    pub(crate) fn close(&mut self, now: DateTime<Utc>) {
        if self.status == PhaseStatus::Active {
            self.status = PhaseStatus::Completed;
            self.ended_at = Some(now);
            self.completions += 1;
        }
    }

    pub(crate) fn fail(&mut self, reason: String, now: DateTime<Utc>) {
        self.status = PhaseStatus::Failed;
        self.ended_at = Some(now);
        self.error = Some(reason);
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
