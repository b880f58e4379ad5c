// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use pcr_core::{ExportBundle, StateStore, StoreError};

/// Wrapper that adds tracing to any StateStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: StateStore> StateStore for TracedStore<S> {
    fn save(&self, bundle: &ExportBundle) -> Result<(), StoreError> {
        let span = tracing::info_span!(
            "store.save",
            tracker_id = %bundle.meta.tracker_id,
            phase = %bundle.state.current_phase,
        );
        let _guard = span.enter();

        tracing::debug!(logs = bundle.logs.len(), "saving");

        let start = std::time::Instant::now();
        let result = self.inner.save(bundle);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "state saved"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "save failed"
            ),
        }

        result
    }

    fn load(&self) -> Result<Option<ExportBundle>, StoreError> {
        let span = tracing::info_span!("store.load");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.load();
        let elapsed = start.elapsed();

        match &result {
            Ok(Some(bundle)) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                tracker_id = %bundle.meta.tracker_id,
                "state loaded"
            ),
            Ok(None) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "no saved state"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "load failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
