// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake log sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use pcr_core::{LogEntry, LogSink, SinkError};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeSinkState {
    entries: Vec<LogEntry>,
    failing: bool,
}

/// Records every entry it receives; can be switched to reject entries
#[derive(Clone, Default)]
pub struct FakeSink {
    state: Arc<Mutex<FakeSinkState>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every entry
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failing = failing;
    }

    /// Entries accepted so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }
}

impl LogSink for FakeSink {
    fn emit(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.failing {
            return Err(SinkError::Rejected("fake sink set to fail".to_string()));
        }
        state.entries.push(entry.clone());
        Ok(())
    }
}
