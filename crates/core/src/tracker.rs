// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase cycle tracker
//!
//! Owns the current phase, one record per phase, the validation flags and a
//! bounded log. Every operation runs to completion on `&mut self`; a failed
//! operation leaves phases, records and flags untouched.

use crate::artifact::{Artifact, ArtifactFilter};
use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::id::{ArtifactId, CycleId, IdGen, TrackerId, UuidIdGen};
use crate::log::{metadata, LogBuffer, LogEntry, LogLevel};
use crate::metrics::{MetricSample, MetricSummary, Metrics};
use crate::phase::{Phase, PhaseRecord, PhaseStatus};
use crate::sink::LogSink;
use crate::snapshot::{CycleReport, ExportBundle, ExportMeta, SelfCheckReport, StateSnapshot};
use crate::store::StateStore;
use crate::validation::{FlagSet, ValidationFlag};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default age after which [`CycleTracker::cleanup`] drops metric samples
pub const DEFAULT_METRIC_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Artifacts below this count trigger an improvement hint in [`CycleTracker::analyze`]
const MIN_ARTIFACTS_HINT: usize = 3;

pub struct CycleTracker<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    config: TrackerConfig,
    clock: C,
    id_gen: G,
    sink: Option<Box<dyn LogSink>>,
    tracker_id: TrackerId,
    cycle_id: CycleId,
    cycle_count: u64,
    current: Phase,
    /// Indexed by `Phase::index`
    records: [PhaseRecord; 5],
    flags: FlagSet,
    logs: LogBuffer,
    next_sequence: u64,
    metrics: Metrics,
    last_intent: Option<String>,
}

impl CycleTracker<SystemClock, UuidIdGen> {
    /// Create a tracker using the system clock and UUID identifiers
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        Self::with_deps(config, SystemClock, UuidIdGen)
    }
}

impl<C: Clock, G: IdGen> CycleTracker<C, G> {
    /// Create a tracker in the first phase, with every other phase pending
    pub fn with_deps(config: TrackerConfig, clock: C, id_gen: G) -> Result<Self, TrackerError> {
        config.validate()?;

        let now = clock.now();
        let mut records = Phase::ALL.map(|_| PhaseRecord::pending());
        records[Phase::FIRST.index()].activate(now);

        let mut tracker = Self {
            tracker_id: TrackerId::generate(&id_gen),
            cycle_id: CycleId::generate(&id_gen),
            cycle_count: 0,
            current: Phase::FIRST,
            records,
            flags: FlagSet::from_defs(&config.flags),
            logs: LogBuffer::new(config.max_log_entries),
            next_sequence: 1,
            metrics: Metrics::new(config.metric_history),
            last_intent: None,
            sink: None,
            config,
            clock,
            id_gen,
        };

        tracker.log(
            LogLevel::Info,
            "Cycle tracker initialized",
            json!({
                "tracker_id": tracker.tracker_id,
                "cycle_id": tracker.cycle_id,
                "flags": tracker.flags.len(),
            }),
        );
        Ok(tracker)
    }

    /// Forward every subsequent log entry to `sink`
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn LogSink>>) {
        self.sink = sink;
    }

    // Accessors

    pub fn tracker_id(&self) -> &TrackerId {
        &self.tracker_id
    }

    pub fn cycle_id(&self) -> &CycleId {
        &self.cycle_id
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn current_phase(&self) -> Phase {
        self.current
    }

    pub fn record(&self, phase: Phase) -> &PhaseRecord {
        &self.records[phase.index()]
    }

    pub fn flag(&self, name: &str) -> Option<&ValidationFlag> {
        self.flags.get(name)
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    /// The last `n` buffered log entries, oldest first
    pub fn recent_logs(&self, n: usize) -> Vec<LogEntry> {
        self.logs.recent(n)
    }

    pub fn last_intent(&self) -> Option<&str> {
        self.last_intent.as_deref()
    }

    // Phase lifecycle

    /// Move to the designated successor of the current phase.
    ///
    /// The current record is completed (a failed record stays failed) and the
    /// target record becomes active. Wrapping back to the first phase starts a
    /// new cycle with a fresh cycle id.
    pub fn transition(&mut self, target: Phase) -> Result<(), TrackerError> {
        let from = self.current;
        let expected = from.next();

        if target != expected {
            self.log(
                LogLevel::Error,
                format!("Invalid phase transition from {} to {}", from, target),
                json!({
                    "from_phase": from,
                    "to_phase": target,
                    "expected_phase": expected,
                }),
            );
            return Err(TrackerError::InvalidTransition {
                from,
                to: target,
                expected,
            });
        }

        let now = self.clock.now();
        self.records[from.index()].close(now);
        self.records[target.index()].activate(now);
        self.current = target;

        let cycle_completed = target == Phase::FIRST;
        if cycle_completed {
            self.cycle_count += 1;
            self.cycle_id = CycleId::generate(&self.id_gen);
        }

        self.log(
            LogLevel::Info,
            format!("Phase transition: {} → {}", from, target),
            json!({
                "previous_phase": from,
                "new_phase": target,
                "cycle_id": self.cycle_id,
                "cycle_completed": cycle_completed,
            }),
        );
        Ok(())
    }

    /// Advance to whatever phase follows the current one
    pub fn advance(&mut self) -> Result<Phase, TrackerError> {
        let target = self.current.next();
        self.transition(target)?;
        Ok(target)
    }

    /// Mark the current (active) phase as failed
    pub fn fail_phase(&mut self, reason: impl Into<String>) -> Result<(), TrackerError> {
        let phase = self.current;
        self.expect_status(phase, PhaseStatus::Active)?;

        let reason = reason.into();
        let now = self.clock.now();
        self.records[phase.index()].fail(reason.clone(), now);

        self.log(
            LogLevel::Error,
            format!("Phase failed: {}", phase),
            json!({ "reason": reason }),
        );
        Ok(())
    }

    /// Re-activate the current phase after a failure
    pub fn retry_phase(&mut self) -> Result<(), TrackerError> {
        let phase = self.current;
        self.expect_status(phase, PhaseStatus::Failed)?;

        let now = self.clock.now();
        self.records[phase.index()].activate(now);

        self.log(LogLevel::Info, format!("Phase retried: {}", phase), json!({}));
        Ok(())
    }

    fn expect_status(&self, phase: Phase, expected: PhaseStatus) -> Result<(), TrackerError> {
        let status = self.records[phase.index()].status;
        if status != expected {
            return Err(TrackerError::UnexpectedStatus {
                phase,
                status,
                expected,
            });
        }
        Ok(())
    }

    // Artifacts

    /// Attach an artifact to the current phase, which must be active.
    /// A failed phase takes no artifacts until it is retried.
    pub fn register_artifact(
        &mut self,
        kind: &str,
        identifier: &str,
        description: &str,
    ) -> Result<ArtifactId, TrackerError> {
        self.expect_status(self.current, PhaseStatus::Active)?;
        if kind.trim().is_empty() {
            return Err(TrackerError::InvalidArtifact("kind"));
        }
        if identifier.trim().is_empty() {
            return Err(TrackerError::InvalidArtifact("identifier"));
        }

        let phase = self.current;
        let artifact = Artifact {
            id: ArtifactId::generate(&self.id_gen),
            identifier: identifier.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            created_at: self.clock.now(),
            phase,
        };
        let id = artifact.id.clone();
        self.records[phase.index()].artifacts.push(artifact);

        self.log(
            LogLevel::Info,
            format!("Artifact added: {}", identifier),
            json!({
                "artifact_id": id,
                "artifact_type": kind,
            }),
        );
        Ok(id)
    }

    /// Artifacts matching `filter`, in phase order then registration order
    pub fn artifacts(&self, filter: &ArtifactFilter) -> Vec<&Artifact> {
        self.records
            .iter()
            .flat_map(|r| r.artifacts.iter())
            .filter(|a| filter.matches(a))
            .collect()
    }

    pub fn artifact(&self, id: &ArtifactId) -> Option<&Artifact> {
        self.records
            .iter()
            .flat_map(|r| r.artifacts.iter())
            .find(|a| &a.id == id)
    }

    pub fn total_artifacts(&self) -> usize {
        self.records.iter().map(|r| r.artifacts.len()).sum()
    }

    // Validation

    /// Set a declared validation flag. Flags keep their value across transitions.
    pub fn set_validation_flag(
        &mut self,
        name: &str,
        passed: bool,
        details: impl Into<String>,
    ) -> Result<(), TrackerError> {
        let details = details.into();
        let details = (!details.is_empty()).then_some(details);
        let now = self.clock.now();

        if !self.flags.set(name, passed, details.clone(), now) {
            self.log(
                LogLevel::Error,
                format!("Unknown validation flag: {}", name),
                json!({ "check": name }),
            );
            return Err(TrackerError::UnknownFlag {
                name: name.to_string(),
            });
        }

        let (level, verdict) = if passed {
            (LogLevel::Info, "PASSED")
        } else {
            (LogLevel::Warn, "FAILED")
        };
        self.log(
            level,
            format!("Validation check {}: {}", name, verdict),
            json!({
                "check": name,
                "passed": passed,
                "check_details": details,
            }),
        );
        Ok(())
    }

    // Intent

    /// Remember the caller's latest intent and hand it back unchanged
    pub fn mirror_intent(&mut self, intent: impl Into<String>) -> String {
        let intent = intent.into();
        self.last_intent = Some(intent.clone());
        self.log(
            LogLevel::Info,
            "Intent mirrored",
            json!({ "intent_len": intent.len() }),
        );
        intent
    }

    // Metrics

    /// Record a metric sample against the current phase. Only finite values
    /// are accepted; NaN and infinities have no JSON representation.
    pub fn record_metric(&mut self, name: &str, value: f64) -> Result<(), TrackerError> {
        if !value.is_finite() {
            self.log(
                LogLevel::Error,
                format!("Invalid metric value: {}", name),
                json!({ "value": value.to_string() }),
            );
            return Err(TrackerError::InvalidMetric {
                name: name.to_string(),
                value,
            });
        }

        let sample = MetricSample {
            value,
            timestamp: self.clock.now(),
            phase: self.current,
        };
        self.metrics.record(name, sample);
        self.log(
            LogLevel::Debug,
            format!("Metric recorded: {}", name),
            json!({ "value": value }),
        );
        Ok(())
    }

    pub fn metric_samples(&self, name: &str) -> Vec<MetricSample> {
        self.metrics.samples(name)
    }

    /// Samples for `name` taken at or after `since`
    pub fn metric_samples_since(&self, name: &str, since: DateTime<Utc>) -> Vec<MetricSample> {
        self.metrics.samples_since(name, since)
    }

    /// Drop metric samples older than `max_age`. Returns how many were dropped.
    pub fn cleanup(&mut self, max_age: Duration) -> usize {
        let now = self.clock.now();
        let cutoff = chrono::Duration::from_std(max_age)
            .ok()
            .and_then(|age| now.checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let removed = self.metrics.prune(cutoff);

        self.log(
            LogLevel::Info,
            "State cleanup completed",
            json!({
                "cutoff_date": cutoff,
                "samples_removed": removed,
            }),
        );
        removed
    }

    pub fn metrics_summary(&self) -> BTreeMap<String, MetricSummary> {
        self.metrics.summary()
    }

    // Views

    /// Owned copy of the current state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            tracker_id: self.tracker_id.clone(),
            cycle_id: self.cycle_id.clone(),
            cycle_count: self.cycle_count,
            current_phase: self.current,
            phases: Phase::ALL
                .into_iter()
                .map(|p| (p, self.records[p.index()].clone()))
                .collect(),
            validation: self.flags.clone(),
            total_artifacts: self.total_artifacts(),
            last_intent: self.last_intent.clone(),
            generated_at: self.clock.now(),
        }
    }

    /// Report failing flags and a current phase without artifacts
    pub fn self_check(&mut self) -> SelfCheckReport {
        let mut issues: Vec<String> = self
            .flags
            .failing()
            .map(|name| format!("Validation check failed: {}", name))
            .collect();

        let current = self.current;
        match self.records.get(current.index()) {
            None => issues.push(format!("Invalid current phase: {}", current)),
            Some(record) if record.artifacts.is_empty() => issues.push(format!(
                "No artifacts generated for current phase: {}",
                current
            )),
            Some(_) => {}
        }

        let report = SelfCheckReport::from_issues(issues);
        if report.valid {
            self.log(LogLevel::Info, "Self-verification passed", json!({}));
        } else {
            self.log(
                LogLevel::Error,
                "Self-verification failed",
                json!({ "issues": report.issues }),
            );
        }
        report
    }

    pub fn analyze(&self) -> CycleReport {
        let completed_phases = self
            .records
            .iter()
            .filter(|r| r.status == PhaseStatus::Completed)
            .count();
        let total_artifacts = self.total_artifacts();
        let compliance = self.flags.compliance();

        let mut improvements = Vec::new();
        if compliance < 1.0 {
            improvements.push("Improve validation compliance".to_string());
        }
        if total_artifacts < MIN_ARTIFACTS_HINT {
            improvements.push("Increase artifact generation".to_string());
        }

        CycleReport {
            cycle_count: self.cycle_count,
            completed_phases,
            total_artifacts,
            compliance,
            improvements,
        }
    }

    /// Serializable bundle with the snapshot and the most recent log entries
    pub fn export_state(&self) -> ExportBundle {
        ExportBundle {
            meta: ExportMeta {
                tracker_id: self.tracker_id.clone(),
                agent_id: self.config.agent_id.clone(),
                version: self.config.version.clone(),
                exported_at: self.clock.now(),
            },
            state: self.snapshot(),
            logs: self.logs.recent(self.config.export_log_limit),
            metrics: self.metrics.export(),
        }
    }

    // Persistence

    /// Rebuild a tracker from an exported bundle.
    ///
    /// Flags come from `config`; values in the bundle are applied to the
    /// declared names and anything else is dropped.
    pub fn restore(
        bundle: ExportBundle,
        config: TrackerConfig,
        clock: C,
        id_gen: G,
    ) -> Result<Self, TrackerError> {
        config.validate()?;
        let ExportBundle {
            meta,
            state,
            logs,
            metrics,
        } = bundle;

        if meta.tracker_id != state.tracker_id {
            return Err(TrackerError::CorruptState(format!(
                "metadata names tracker {} but state belongs to {}",
                meta.tracker_id, state.tracker_id
            )));
        }

        let records = restore_records(&state)?;

        let mut flags = FlagSet::from_defs(&config.flags);
        let dropped: Vec<String> = state
            .validation
            .iter()
            .filter(|(name, flag)| !flags.restore(name, flag))
            .map(|(name, _)| name.to_string())
            .collect();

        let mut buffer = LogBuffer::new(config.max_log_entries);
        let next_sequence = logs.iter().map(|e| e.sequence).max().unwrap_or(0) + 1;
        for entry in logs {
            buffer.push(entry);
        }

        let mut tracker = Self {
            tracker_id: state.tracker_id,
            cycle_id: state.cycle_id,
            cycle_count: state.cycle_count,
            current: state.current_phase,
            records,
            flags,
            logs: buffer,
            next_sequence,
            metrics: Metrics::restore(metrics, config.metric_history),
            last_intent: state.last_intent,
            sink: None,
            config,
            clock,
            id_gen,
        };

        tracker.log(
            LogLevel::Debug,
            "State restored",
            json!({
                "exported_at": meta.exported_at,
                "version": meta.version,
                "artifacts_count": tracker.total_artifacts(),
            }),
        );
        if !dropped.is_empty() {
            tracker.log(
                LogLevel::Warn,
                "Dropped undeclared validation flags",
                json!({ "flags": dropped }),
            );
        }
        Ok(tracker)
    }

    /// Restore from `store`, or start fresh if it is empty, unreadable or corrupt.
    ///
    /// Only an invalid `config` is reported as an error.
    pub fn load_or_new<S>(
        store: &S,
        config: TrackerConfig,
        clock: C,
        id_gen: G,
    ) -> Result<Self, TrackerError>
    where
        S: StateStore + ?Sized,
    {
        let failure = match store.load() {
            Ok(None) => return Self::with_deps(config, clock, id_gen),
            Ok(Some(bundle)) => {
                match Self::restore(bundle, config.clone(), clock.clone(), id_gen.clone()) {
                    Ok(tracker) => return Ok(tracker),
                    Err(e @ TrackerError::Config(_)) => return Err(e),
                    Err(e) => e.to_string(),
                }
            }
            Err(e) => e.to_string(),
        };

        tracing::warn!(error = %failure, "starting fresh tracker");
        let mut tracker = Self::with_deps(config, clock, id_gen)?;
        tracker.log(
            LogLevel::Warn,
            "Failed to load persisted state",
            json!({ "error": failure }),
        );
        Ok(tracker)
    }

    /// Best-effort save. Returns whether the store accepted the bundle.
    pub fn persist<S>(&mut self, store: &S) -> bool
    where
        S: StateStore + ?Sized,
    {
        let bundle = self.export_state();
        match store.save(&bundle) {
            Ok(()) => {
                self.log(LogLevel::Debug, "State persisted", json!({}));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "state store save failed");
                self.log(
                    LogLevel::Warn,
                    "Failed to persist state",
                    json!({ "error": e.to_string() }),
                );
                false
            }
        }
    }

    // Logging

    /// Append an entry to the buffer and forward it to the sink.
    ///
    /// A sink failure is recorded as a WARN entry that is not forwarded.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>, meta: Value) {
        let entry = self.make_entry(level, message.into(), meta);
        let failure = self.sink.as_ref().and_then(|sink| sink.emit(&entry).err());
        self.logs.push(entry);

        if let Some(e) = failure {
            tracing::warn!(error = %e, "log sink failed");
            let warning = self.make_entry(
                LogLevel::Warn,
                "Log sink failed".to_string(),
                json!({ "error": e.to_string() }),
            );
            self.logs.push(warning);
        }
    }

    fn make_entry(&mut self, level: LogLevel, message: String, meta: Value) -> LogEntry {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        LogEntry {
            sequence,
            timestamp: self.clock.now(),
            level,
            phase: self.current,
            message,
            metadata: metadata(meta),
        }
    }
}

/// Check a snapshot's records and lay them out by phase index
fn restore_records(state: &StateSnapshot) -> Result<[PhaseRecord; 5], TrackerError> {
    let mut missing = Vec::new();
    let records = Phase::ALL.map(|phase| match state.phases.get(&phase) {
        Some(record) => record.clone(),
        None => {
            missing.push(phase.name());
            PhaseRecord::pending()
        }
    });
    if !missing.is_empty() {
        return Err(TrackerError::CorruptState(format!(
            "missing phase records: {}",
            missing.join(", ")
        )));
    }

    let current = state.current_phase;
    let status = records[current.index()].status;
    if !matches!(status, PhaseStatus::Active | PhaseStatus::Failed) {
        return Err(TrackerError::CorruptState(format!(
            "current phase {} is {}",
            current, status
        )));
    }

    for phase in Phase::ALL {
        let record = &records[phase.index()];
        if record.is_active() && phase != current {
            return Err(TrackerError::CorruptState(format!(
                "phase {} is active but current phase is {}",
                phase, current
            )));
        }
        if let Some(stray) = record.artifacts.iter().find(|a| a.phase != phase) {
            return Err(TrackerError::CorruptState(format!(
                "artifact {} owned by {} is filed under {}",
                stray.id, stray.phase, phase
            )));
        }
    }

    Ok(records)
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
