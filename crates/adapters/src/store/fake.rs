// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake state store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use pcr_core::{ExportBundle, StateStore, StoreError};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeStoreState {
    saved: Option<ExportBundle>,
    saves: usize,
    failing: bool,
}

/// In-memory store; can be switched to fail every call
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeStoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bundle`
    pub fn holding(bundle: ExportBundle) -> Self {
        let store = Self::default();
        store.state.lock().unwrap_or_else(|e| e.into_inner()).saved = Some(bundle);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failing = failing;
    }

    pub fn saved(&self) -> Option<ExportBundle> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .saved
            .clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).saves
    }
}

impl StateStore for FakeStore {
    fn save(&self, bundle: &ExportBundle) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.failing {
            return Err(StoreError::Unavailable("fake store set to fail".to_string()));
        }
        state.saved = Some(bundle.clone());
        state.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<ExportBundle>, StoreError> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.failing {
            return Err(StoreError::Unavailable("fake store set to fail".to_string()));
        }
        Ok(state.saved.clone())
    }
}
