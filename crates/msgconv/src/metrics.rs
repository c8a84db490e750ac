//! Per-context generation metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one context
///
/// Updated with relaxed atomics so `generate` can keep taking `&self`.
#[derive(Debug, Default)]
pub struct GenerationMetrics {
    /// Payloads produced
    generated_count: AtomicU64,
    /// Batches that produced no payload
    skipped_count: AtomicU64,
    /// Sum of produced payload sizes
    bytes_total: AtomicU64,
}

impl GenerationMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get generated payload count
    pub fn generated_count(&self) -> u64 {
        self.generated_count.load(Ordering::Relaxed)
    }

    /// Count a produced payload of `bytes` bytes
    pub fn record_generated(&self, bytes: usize) {
        self.generated_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_total.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Get skipped batch count
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count.load(Ordering::Relaxed)
    }

    /// Count a batch without payload
    pub fn record_skipped(&self) {
        self.skipped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total produced bytes
    pub fn bytes_total(&self) -> u64 {
        self.bytes_total.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generated_count: self.generated_count(),
            skipped_count: self.skipped_count(),
            bytes_total: self.bytes_total(),
        }
    }
}

/// Snapshot of generation metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub generated_count: u64,
    pub skipped_count: u64,
    pub bytes_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot() {
        let metrics = GenerationMetrics::new();
        metrics.record_generated(100);
        metrics.record_generated(20);
        metrics.record_skipped();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                generated_count: 2,
                skipped_count: 1,
                bytes_total: 120,
            }
        );
    }
}
