// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn fake_clock_is_frozen_until_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    assert_eq!(clock.now(), t1);

    clock.advance(Duration::from_secs(60));
    assert_eq!((clock.now() - t1).num_seconds(), 60);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    assert_eq!((clock1.now() - t1).num_seconds(), 30);
}

#[test]
fn fake_clock_set_overrides_time() {
    let clock = FakeClock::new();
    let target = DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[test]
fn fake_clock_ignores_unrepresentable_durations() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::MAX);
    assert_eq!(clock.now(), t1);
}
