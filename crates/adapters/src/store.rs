// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State stores that keep nothing, or keep everything in memory for tests

use pcr_core::{ExportBundle, StateStore, StoreError};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeStore;

/// Accepts every save and never has anything to load
#[derive(Clone, Debug, Default)]
pub struct NoOpStore;

impl NoOpStore {
    pub fn new() -> Self {
        Self
    }
}

impl StateStore for NoOpStore {
    fn save(&self, _bundle: &ExportBundle) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self) -> Result<Option<ExportBundle>, StoreError> {
        Ok(None)
    }
}
