// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifacts attributed to phases

use crate::id::ArtifactId;
use crate::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tagged record registered while a phase was current
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    /// Path or type the artifact refers to
    pub identifier: String,
    pub kind: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Phase that was current at registration
    pub phase: Phase,
}

/// Selects artifacts by owning phase and/or kind
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    pub phase: Option<Phase>,
    pub kind: Option<String>,
}

impl ArtifactFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn of_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        if self.phase.is_some_and(|p| p != artifact.phase) {
            return false;
        }
        if self.kind.as_deref().is_some_and(|k| k != artifact.kind) {
            return false;
        }
        true
    }
}
