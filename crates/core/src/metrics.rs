// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-name metric series with bounded history

use crate::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
}

/// Aggregate view of one metric's retained samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub latest: f64,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    series: BTreeMap<String, VecDeque<MetricSample>>,
    history: usize,
}

impl Metrics {
    pub fn new(history: usize) -> Self {
        Self {
            series: BTreeMap::new(),
            history: history.max(1),
        }
    }

    pub fn record(&mut self, name: &str, sample: MetricSample) {
        let series = self.series.entry(name.to_string()).or_default();
        series.push_back(sample);
        while series.len() > self.history {
            series.pop_front();
        }
    }

    /// Retained samples for `name`, oldest first
    pub fn samples(&self, name: &str) -> Vec<MetricSample> {
        self.series
            .get(name)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Samples for `name` taken at or after `since`
    pub fn samples_since(&self, name: &str, since: DateTime<Utc>) -> Vec<MetricSample> {
        self.series
            .get(name)
            .map(|s| s.iter().filter(|m| m.timestamp >= since).cloned().collect())
            .unwrap_or_default()
    }

    /// Drop samples taken at or before `cutoff`; series left empty are removed.
    /// Returns the number of samples dropped.
    pub fn prune(&mut self, cutoff: DateTime<Utc>) -> usize {
        let mut removed = 0;
        for series in self.series.values_mut() {
            let before = series.len();
            series.retain(|m| m.timestamp > cutoff);
            removed += before - series.len();
        }
        self.series.retain(|_, series| !series.is_empty());
        removed
    }

    pub fn summary(&self) -> BTreeMap<String, MetricSummary> {
        self.series
            .iter()
            .filter_map(|(name, samples)| summarize(samples).map(|s| (name.clone(), s)))
            .collect()
    }

    /// All retained samples, for export
    pub fn export(&self) -> BTreeMap<String, Vec<MetricSample>> {
        self.series
            .iter()
            .map(|(name, samples)| (name.clone(), samples.iter().cloned().collect()))
            .collect()
    }

    /// Rebuild from exported samples, trimming each series to `history`
    pub fn restore(exported: BTreeMap<String, Vec<MetricSample>>, history: usize) -> Self {
        let mut metrics = Self::new(history);
        for (name, samples) in exported {
            for sample in samples {
                metrics.record(&name, sample);
            }
        }
        metrics
    }
}

fn summarize(samples: &VecDeque<MetricSample>) -> Option<MetricSummary> {
    let latest = samples.back()?.value;
    let count = samples.len();
    let sum: f64 = samples.iter().map(|s| s.value).sum();
    let min = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
    let max = samples.iter().map(|s| s.value).fold(f64::NEG_INFINITY, f64::max);
    Some(MetricSummary {
        count,
        average: sum / count as f64,
        min,
        max,
        latest,
    })
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
