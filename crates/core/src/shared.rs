// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe handle to a tracker
//!
//! Every call takes the lock for its whole duration, so a reader never sees a
//! transition half applied. A poisoned lock is recovered; the tracker never
//! panics mid-operation, so its state is still consistent.

use crate::artifact::Artifact;
use crate::clock::{Clock, SystemClock};
use crate::error::TrackerError;
use crate::id::{ArtifactId, IdGen, UuidIdGen};
use crate::phase::Phase;
use crate::snapshot::{ExportBundle, SelfCheckReport, StateSnapshot};
use crate::store::StateStore;
use crate::tracker::CycleTracker;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SharedTracker<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    inner: Arc<Mutex<CycleTracker<C, G>>>,
}

impl<C: Clock, G: IdGen> Clone for SharedTracker<C, G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock, G: IdGen> SharedTracker<C, G> {
    pub fn new(tracker: CycleTracker<C, G>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CycleTracker<C, G>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run several operations under a single lock
    pub fn with<R>(&self, f: impl FnOnce(&mut CycleTracker<C, G>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn current_phase(&self) -> Phase {
        self.lock().current_phase()
    }

    pub fn transition(&self, target: Phase) -> Result<(), TrackerError> {
        self.lock().transition(target)
    }

    pub fn advance(&self) -> Result<Phase, TrackerError> {
        self.lock().advance()
    }

    pub fn register_artifact(
        &self,
        kind: &str,
        identifier: &str,
        description: &str,
    ) -> Result<ArtifactId, TrackerError> {
        self.lock().register_artifact(kind, identifier, description)
    }

    pub fn artifact(&self, id: &ArtifactId) -> Option<Artifact> {
        self.lock().artifact(id).cloned()
    }

    pub fn set_validation_flag(
        &self,
        name: &str,
        passed: bool,
        details: impl Into<String>,
    ) -> Result<(), TrackerError> {
        self.lock().set_validation_flag(name, passed, details)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().snapshot()
    }

    pub fn self_check(&self) -> SelfCheckReport {
        self.lock().self_check()
    }

    pub fn export_state(&self) -> ExportBundle {
        self.lock().export_state()
    }

    pub fn persist<S>(&self, store: &S) -> bool
    where
        S: StateStore + ?Sized,
    {
        self.lock().persist(store)
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
