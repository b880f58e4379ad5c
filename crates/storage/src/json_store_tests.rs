// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pcr_core::{CycleTracker, FakeClock, Phase, SequentialIdGen, TrackerConfig};

fn bundle() -> ExportBundle {
    let mut tracker = CycleTracker::with_deps(
        TrackerConfig::default(),
        FakeClock::new(),
        SequentialIdGen::new("j"),
    )
    .unwrap();
    tracker.register_artifact("doc", "plan.md", "plan").unwrap();
    tracker.transition(Phase::Maker).unwrap();
    tracker.export_state()
}

#[test]
fn load_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));

    assert!(!store.exists());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/state.json"));
    let bundle = bundle();

    store.save(&bundle).unwrap();

    assert!(store.exists());
    assert!(!dir.path().join("nested/state.json.tmp").exists());
    assert_eq!(store.load().unwrap(), Some(bundle));
}

#[test]
fn save_overwrites_previous_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    let mut bundle = bundle();
    store.save(&bundle).unwrap();

    bundle.meta.agent_id = "second".to_string();
    store.save(&bundle).unwrap();

    assert_eq!(store.load().unwrap().unwrap().meta.agent_id, "second");
}

#[test]
fn saved_file_is_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    store.save(&bundle()).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["state"]["current_phase"], "MAKER");
    assert_eq!(value["meta"]["version"], "1.1");
}

#[test]
fn garbage_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(path).load().unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}
