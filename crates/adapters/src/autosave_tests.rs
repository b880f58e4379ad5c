// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::FakeStore;
use pcr_core::{CycleTracker, FakeClock, LogLevel, Phase, SequentialIdGen, TrackerConfig};

fn shared() -> SharedTracker<FakeClock, SequentialIdGen> {
    let tracker = CycleTracker::with_deps(
        TrackerConfig::default(),
        FakeClock::new(),
        SequentialIdGen::new("a"),
    )
    .unwrap();
    SharedTracker::new(tracker)
}

#[tokio::test(start_paused = true)]
async fn saves_on_each_interval_and_on_stop() {
    let tracker = shared();
    let store = Arc::new(FakeStore::new());
    let saver = AutoSaver::spawn(tracker.clone(), Arc::clone(&store), Duration::from_secs(10));

    tokio::time::sleep(Duration::from_secs(35)).await;
    assert_eq!(store.save_count(), 3);

    tracker.transition(Phase::Maker).unwrap();
    assert_eq!(saver.stop().await, 4);

    let saved = store.saved().unwrap();
    assert_eq!(saved.state.current_phase, Phase::Maker);
}

#[tokio::test(start_paused = true)]
async fn failed_saves_do_not_stop_the_loop() {
    let tracker = shared();
    let store = Arc::new(FakeStore::new());
    store.set_failing(true);
    let saver = AutoSaver::spawn(tracker.clone(), Arc::clone(&store), Duration::from_secs(5));

    tokio::time::sleep(Duration::from_secs(12)).await;
    store.set_failing(false);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(store.save_count(), 1);
    assert_eq!(saver.stop().await, 2);

    let warnings = tracker.with(|t| {
        t.logs()
            .iter()
            .filter(|e| e.level == LogLevel::Warn && e.message == "Failed to persist state")
            .count()
    });
    assert_eq!(warnings, 2);
    assert_eq!(tracker.current_phase(), Phase::Planner);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_saver_flushes_once() {
    let tracker = shared();
    let store = Arc::new(FakeStore::new());
    let saver = AutoSaver::spawn(tracker, Arc::clone(&store), Duration::from_secs(60));

    drop(saver);
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(store.save_count(), 1);
}
