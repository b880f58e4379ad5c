// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sinks that forward tracker entries to tracing, or nowhere

use pcr_core::{LogEntry, LogLevel, LogSink, SinkError};
use serde_json::Value;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;

/// Re-emits every entry as a tracing event at the matching level
#[derive(Clone, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let phase = entry.phase.name();
        let sequence = entry.sequence;
        let metadata = Value::Object(entry.metadata.clone());
        let message = entry.message.as_str();

        match entry.level {
            LogLevel::Debug => tracing::debug!(phase, sequence, %metadata, "{}", message),
            LogLevel::Info => tracing::info!(phase, sequence, %metadata, "{}", message),
            LogLevel::Warn => tracing::warn!(phase, sequence, %metadata, "{}", message),
            LogLevel::Error => tracing::error!(phase, sequence, %metadata, "{}", message),
        }
        Ok(())
    }
}

/// Discards every entry
#[derive(Clone, Debug, Default)]
pub struct NoOpSink;

impl NoOpSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for NoOpSink {
    fn emit(&self, _entry: &LogEntry) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
