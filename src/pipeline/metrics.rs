// src/pipeline/metrics.rs
//
// Engine observability. Counters are shared atomics so a cloned handle
// reports the same numbers from any thread.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct EngineMetrics {
    pub scenes_loaded: Arc<AtomicU64>,
    pub cache_hits: Arc<AtomicU64>,
    pub cache_misses: Arc<AtomicU64>,
    pub scenes_analyzed: Arc<AtomicU64>,
    pub scenes_failed: Arc<AtomicU64>,
    pub samples_processed: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self {
            scenes_loaded: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cache_misses: Arc::new(AtomicU64::new(0)),
            scenes_analyzed: Arc::new(AtomicU64::new(0)),
            scenes_failed: Arc::new(AtomicU64::new(0)),
            samples_processed: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            scenes_loaded: self.scenes_loaded.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_hit_rate: self.cache_hit_rate(),
            scenes_analyzed: self.scenes_analyzed.load(Ordering::Relaxed),
            scenes_failed: self.scenes_failed.load(Ordering::Relaxed),
            samples_processed: self.samples_processed.load(Ordering::Relaxed),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub scenes_loaded: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
    pub scenes_analyzed: u64,
    pub scenes_failed: u64,
    pub samples_processed: u64,
    pub elapsed_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let metrics = EngineMetrics::new();
        let handle = metrics.clone();
        handle.inc(&handle.cache_hits);
        metrics.inc(&metrics.cache_misses);
        metrics.add(&metrics.samples_processed, 40);

        let summary = metrics.summary();
        assert_eq!(summary.cache_hits, 1);
        assert_eq!(summary.cache_misses, 1);
        assert_eq!(summary.samples_processed, 40);
        assert_eq!(summary.cache_hit_rate, 0.5);
    }

    #[test]
    fn test_hit_rate_without_traffic() {
        assert_eq!(EngineMetrics::new().cache_hit_rate(), 0.0);
    }
}
