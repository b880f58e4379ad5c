// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact commands

use super::update;
use crate::output::{self, OutputFormat};
use crate::state::StateFile;
use anyhow::Result;
use pcr_core::{Artifact, ArtifactFilter, Phase};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
#[serde(transparent)]
struct ArtifactRow(Artifact);

impl fmt::Display for ArtifactRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.0;
        write!(
            f,
            "{:<14} {:<10} {}",
            a.phase.name(),
            a.kind,
            a.identifier
        )?;
        if !a.description.is_empty() {
            write!(f, "  ({})", a.description)?;
        }
        Ok(())
    }
}

pub fn register(state: &StateFile, kind: &str, identifier: &str, description: &str) -> Result<()> {
    let (tracker, id) = update(state, |t| t.register_artifact(kind, identifier, description))?;
    println!(
        "Registered {} '{}' in {} ({})",
        kind,
        identifier,
        tracker.current_phase(),
        id
    );
    Ok(())
}

pub fn list(
    state: &StateFile,
    phase: Option<Phase>,
    kind: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let tracker = state.load()?;

    let mut filter = ArtifactFilter::all();
    if let Some(phase) = phase {
        filter = filter.in_phase(phase);
    }
    if let Some(kind) = kind {
        filter = filter.of_kind(kind);
    }

    let rows: Vec<ArtifactRow> = tracker
        .artifacts(&filter)
        .into_iter()
        .cloned()
        .map(ArtifactRow)
        .collect();
    output::print_list(&rows, format, "No artifacts")
}
