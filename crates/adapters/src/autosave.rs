// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic background persistence of a shared tracker

use pcr_core::{Clock, IdGen, SharedTracker, StateStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Background task that persists a tracker at a fixed interval.
///
/// Failed saves are logged by the tracker and do not stop the loop. Stopping
/// (or dropping) the saver triggers one final save.
pub struct AutoSaver {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
}

impl AutoSaver {
    /// Start saving `tracker` to `store` every `interval`. Must be called
    /// inside a tokio runtime.
    pub fn spawn<C, G, S>(tracker: SharedTracker<C, G>, store: Arc<S>, interval: Duration) -> Self
    where
        C: Clock + 'static,
        G: IdGen + 'static,
        S: StateStore + ?Sized + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        let (shutdown, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut saves = 0u64;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        if tracker.persist(store.as_ref()) {
                            saves += 1;
                        }
                    }
                    _ = &mut shutdown_rx => {
                        if tracker.persist(store.as_ref()) {
                            saves += 1;
                        }
                        tracing::debug!(saves, "autosave stopped");
                        break;
                    }
                }
            }
            saves
        });

        tracing::debug!(interval_ms = interval.as_millis() as u64, "autosave started");
        Self {
            shutdown: Some(shutdown),
            task,
        }
    }

    /// Stop after one final save. Returns the number of successful saves.
    pub async fn stop(mut self) -> u64 {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        match self.task.await {
            Ok(saves) => saves,
            Err(e) => {
                tracing::warn!(error = %e, "autosave task ended abnormally");
                0
            }
        }
    }
}

#[cfg(test)]
#[path = "autosave_tests.rs"]
mod tests;
