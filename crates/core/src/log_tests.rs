// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn entry(sequence: u64) -> LogEntry {
    LogEntry {
        sequence,
        timestamp: Utc::now(),
        level: LogLevel::Info,
        phase: Phase::Planner,
        message: format!("entry {}", sequence),
        metadata: Map::new(),
    }
}

#[test]
fn buffer_keeps_entries_in_order() {
    let mut buffer = LogBuffer::new(10);
    for i in 1..=3 {
        buffer.push(entry(i));
    }

    let seqs: Vec<u64> = buffer.iter().map(|e| e.sequence).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
    assert_eq!(buffer.last().unwrap().sequence, 3);
}

#[test]
fn buffer_evicts_oldest_when_full() {
    let mut buffer = LogBuffer::new(3);
    for i in 1..=5 {
        buffer.push(entry(i));
    }

    let seqs: Vec<u64> = buffer.iter().map(|e| e.sequence).collect();
    assert_eq!(seqs, vec![3, 4, 5]);
    assert_eq!(buffer.evicted(), 2);
    assert_eq!(buffer.len(), 3);
}

#[test]
fn recent_returns_tail_oldest_first() {
    let mut buffer = LogBuffer::new(10);
    for i in 1..=6 {
        buffer.push(entry(i));
    }

    let seqs: Vec<u64> = buffer.recent(2).iter().map(|e| e.sequence).collect();
    assert_eq!(seqs, vec![5, 6]);
    assert_eq!(buffer.recent(100).len(), 6);
    assert!(buffer.recent(0).is_empty());
}

#[test]
fn zero_capacity_is_clamped_to_one() {
    let mut buffer = LogBuffer::new(0);
    buffer.push(entry(1));
    buffer.push(entry(2));
    assert_eq!(buffer.capacity(), 1);
    assert_eq!(buffer.last().unwrap().sequence, 2);
}

#[test]
fn metadata_keeps_objects_only() {
    assert_eq!(metadata(json!({"a": 1})).len(), 1);
    assert!(metadata(json!("not an object")).is_empty());
}

#[test]
fn entry_display_is_single_line() {
    let line = entry(7).to_string();
    assert!(line.contains("INFO [PLANNER]: entry 7"));
}

#[test]
fn level_serializes_upper_case() {
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn buffer_never_exceeds_capacity(capacity in 1usize..20, pushes in 0u64..60) {
            let mut buffer = LogBuffer::new(capacity);
            for i in 0..pushes {
                buffer.push(entry(i));
            }
            prop_assert!(buffer.len() <= capacity);
            prop_assert_eq!(buffer.len() as u64 + buffer.evicted(), pushes);
            if pushes > 0 {
                prop_assert_eq!(buffer.last().map(|e| e.sequence), Some(pushes - 1));
            }
        }
    }
}
