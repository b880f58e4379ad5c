// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only commands: status, report, logs, export

use crate::output::{self, OutputFormat};
use crate::state::StateFile;
use anyhow::Result;
use pcr_core::{CycleReport, LogEntry, LogLevel, MetricSummary, Phase, StateSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Serialize)]
#[serde(transparent)]
struct StatusView(StateSnapshot);

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.0;
        let status = s
            .record(s.current_phase)
            .map(|r| r.status.to_string())
            .unwrap_or_default();

        writeln!(f, "Tracker: {}", s.tracker_id)?;
        writeln!(f, "Cycle:   {} (completed: {})", s.cycle_id, s.cycle_count)?;
        writeln!(f, "Phase:   {} ({})", s.current_phase, status)?;
        if let Some(intent) = &s.last_intent {
            writeln!(f, "Intent:  {}", intent)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<14} {:<10} {:<10} COMPLETIONS",
            "PHASE", "STATUS", "ARTIFACTS"
        )?;
        for (phase, record) in &s.phases {
            writeln!(
                f,
                "{:<14} {:<10} {:<10} {}",
                phase.name(),
                record.status.to_string(),
                record.artifacts.len(),
                record.completions
            )?;
            if let Some(error) = &record.error {
                writeln!(f, "  error: {}", error)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Validation: {}/{} passed",
            s.validation.passed_count(),
            s.validation.len()
        )?;
        for (name, flag) in s.validation.iter() {
            let mark = if flag.passed { "x" } else { " " };
            writeln!(f, "  [{}] {:<10} {}", mark, name, flag.description)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportView {
    #[serde(flatten)]
    report: CycleReport,
    metrics: BTreeMap<String, MetricSummary>,
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.report;
        writeln!(f, "Completed cycles: {}", r.cycle_count)?;
        writeln!(
            f,
            "Completed phases: {}/{}",
            r.completed_phases,
            Phase::ALL.len()
        )?;
        writeln!(f, "Artifacts:        {}", r.total_artifacts)?;
        writeln!(f, "Compliance:       {:.0}%", r.compliance * 100.0)?;

        if !r.improvements.is_empty() {
            writeln!(f)?;
            writeln!(f, "Improvements:")?;
            for hint in &r.improvements {
                writeln!(f, "  - {}", hint)?;
            }
        }

        if !self.metrics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Metrics:")?;
            for (name, m) in &self.metrics {
                writeln!(
                    f,
                    "  {:<16} count={} avg={:.2} min={} max={} latest={}",
                    name, m.count, m.average, m.min, m.max, m.latest
                )?;
            }
        }
        Ok(())
    }
}

pub fn status(state: &StateFile, format: OutputFormat) -> Result<()> {
    let tracker = state.load()?;
    output::print(&StatusView(tracker.snapshot()), format)
}

pub fn report(state: &StateFile, format: OutputFormat) -> Result<()> {
    let tracker = state.load()?;
    let view = ReportView {
        report: tracker.analyze(),
        metrics: tracker.metrics_summary(),
    };
    output::print(&view, format)
}

/// The last `limit` entries; DEBUG entries only when `debug` is set
pub fn logs(state: &StateFile, limit: usize, debug: bool, format: OutputFormat) -> Result<()> {
    let tracker = state.load()?;
    let entries: Vec<LogEntry> = tracker
        .logs()
        .iter()
        .filter(|e| debug || e.level > LogLevel::Debug)
        .cloned()
        .collect();
    let skip = entries.len().saturating_sub(limit);
    output::print_list(&entries[skip..], format, "No log entries")
}

pub fn export(state: &StateFile, output: Option<&Path>) -> Result<()> {
    let tracker = state.load()?;
    let json = serde_json::to_string_pretty(&tracker.export_state())?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Exported state to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
