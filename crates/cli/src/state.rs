// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tracker state file the CLI works against

use crate::error::PcrError;
use anyhow::Result;
use pcr_adapters::{TracedStore, TracingSink};
use pcr_core::{
    CycleTracker, StateStore, StoreError, SystemClock, TrackerConfig, TrackerError, UuidIdGen,
};
use pcr_storage::{JsonFileStore, LogFileSink};
use std::path::{Path, PathBuf};

pub struct StateFile {
    store: TracedStore<JsonFileStore>,
    config: TrackerConfig,
    log_file: Option<PathBuf>,
}

impl StateFile {
    pub fn open(path: PathBuf, config: Option<&Path>, log_file: Option<PathBuf>) -> Result<Self> {
        let config = match config {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::default(),
        };
        Ok(Self {
            store: TracedStore::new(JsonFileStore::new(path)),
            config,
            log_file,
        })
    }

    pub fn path(&self) -> &Path {
        self.store.inner().path()
    }

    /// Create a fresh tracker, refusing to clobber existing state unless `force`
    pub fn init(&self, force: bool) -> Result<CycleTracker> {
        if self.store.inner().exists() && !force {
            return Err(PcrError::already_initialized(self.path()).into());
        }
        let tracker = CycleTracker::new(self.config.clone())?;
        let tracker = self.attach_sink(tracker)?;
        self.save(&tracker)?;
        Ok(tracker)
    }

    pub fn load(&self) -> Result<CycleTracker> {
        let bundle = match self.store.load() {
            Ok(Some(bundle)) => bundle,
            Ok(None) => return Err(PcrError::not_initialized(self.path()).into()),
            Err(e @ StoreError::Json(_)) => {
                return Err(PcrError::corrupt_state(self.path(), &e).with_source(e).into())
            }
            Err(e) => return Err(e.into()),
        };

        let tracker = match CycleTracker::restore(
            bundle,
            self.config.clone(),
            SystemClock,
            UuidIdGen,
        ) {
            Ok(tracker) => tracker,
            Err(e @ TrackerError::CorruptState(_)) => {
                return Err(PcrError::corrupt_state(self.path(), &e).with_source(e).into())
            }
            Err(e) => return Err(e.into()),
        };
        self.attach_sink(tracker)
    }

    pub fn save(&self, tracker: &CycleTracker) -> Result<()> {
        self.store.save(&tracker.export_state())?;
        Ok(())
    }

    fn attach_sink(&self, tracker: CycleTracker) -> Result<CycleTracker> {
        let tracker = match &self.log_file {
            Some(path) => tracker.with_sink(LogFileSink::open(path)?),
            None => tracker.with_sink(TracingSink::new()),
        };
        Ok(tracker)
    }
}

