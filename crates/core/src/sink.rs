// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink: where the tracker forwards every log entry

use crate::log::LogEntry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sink rejected entry: {0}")]
    Rejected(String),
}

/// Receives each log entry the tracker emits.
///
/// Sinks are treated as unreliable: an error is recorded by the tracker as a
/// warning in its own buffer and never changes tracker state.
pub trait LogSink: Send + Sync {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).emit(entry)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).emit(entry)
    }
}
