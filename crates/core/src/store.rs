// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence store for exported tracker state

use crate::snapshot::ExportBundle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Saves and loads export bundles.
///
/// Like sinks, stores are unreliable collaborators; the tracker's
/// best-effort helpers log their failures instead of propagating them.
pub trait StateStore: Send + Sync {
    fn save(&self, bundle: &ExportBundle) -> Result<(), StoreError>;

    /// Load the last saved bundle, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<ExportBundle>, StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn save(&self, bundle: &ExportBundle) -> Result<(), StoreError> {
        (**self).save(bundle)
    }

    fn load(&self) -> Result<Option<ExportBundle>, StoreError> {
        (**self).load()
    }
}
