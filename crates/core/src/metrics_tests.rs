// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample(value: f64) -> MetricSample {
    sample_at(value, Utc::now())
}

fn sample_at(value: f64, timestamp: DateTime<Utc>) -> MetricSample {
    MetricSample {
        value,
        timestamp,
        phase: Phase::Maker,
    }
}

#[test]
fn summary_aggregates_samples() {
    let mut metrics = Metrics::new(100);
    for v in [2.0, 4.0, 9.0] {
        metrics.record("render_ms", sample(v));
    }

    let summary = metrics.summary();
    let render = &summary["render_ms"];
    assert_eq!(render.count, 3);
    assert_eq!(render.average, 5.0);
    assert_eq!(render.min, 2.0);
    assert_eq!(render.max, 9.0);
    assert_eq!(render.latest, 9.0);
}

#[test]
fn history_is_bounded_per_metric() {
    let mut metrics = Metrics::new(2);
    for v in [1.0, 2.0, 3.0] {
        metrics.record("a", sample(v));
    }
    metrics.record("b", sample(10.0));

    let values: Vec<f64> = metrics.samples("a").iter().map(|s| s.value).collect();
    assert_eq!(values, vec![2.0, 3.0]);
    assert_eq!(metrics.samples("b").len(), 1);
    assert!(metrics.samples("missing").is_empty());
}

#[test]
fn restore_rebuilds_series_and_trims() {
    let mut metrics = Metrics::new(10);
    for v in [1.0, 2.0, 3.0, 4.0] {
        metrics.record("a", sample(v));
    }

    let restored = Metrics::restore(metrics.export(), 3);
    let values: Vec<f64> = restored.samples("a").iter().map(|s| s.value).collect();
    assert_eq!(values, vec![2.0, 3.0, 4.0]);
}

#[test]
fn samples_since_is_inclusive() {
    let start = Utc::now();
    let mut metrics = Metrics::new(10);
    for (v, offset) in [(1.0, 0), (2.0, 60), (3.0, 120)] {
        metrics.record("a", sample_at(v, start + chrono::Duration::seconds(offset)));
    }

    let since = start + chrono::Duration::seconds(60);
    let values: Vec<f64> = metrics
        .samples_since("a", since)
        .iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec![2.0, 3.0]);
    assert!(metrics.samples_since("missing", since).is_empty());
}

#[test]
fn prune_drops_old_samples_and_empty_series() {
    let start = Utc::now();
    let mut metrics = Metrics::new(10);
    metrics.record("old", sample_at(1.0, start));
    metrics.record("mixed", sample_at(2.0, start));
    metrics.record("mixed", sample_at(3.0, start + chrono::Duration::seconds(10)));

    let removed = metrics.prune(start);

    assert_eq!(removed, 2);
    assert!(!metrics.export().contains_key("old"));
    assert_eq!(metrics.samples("mixed").len(), 1);
    assert!(!metrics.summary().contains_key("old"));
}
