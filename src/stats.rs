//! Service counters
//!
//! Request bookkeeping for the metadata endpoint. Never read by the
//! prediction path.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct PredictionStats {
    served: AtomicU64,
    rejected: AtomicU64,
    potable: AtomicU64,
    latency_sum_us: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsSnapshot {
    pub predictions_served: u64,
    pub predictions_rejected: u64,
    pub potable_count: u64,
    pub avg_latency_us: f64,
}

impl PredictionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_served(&self, potable: bool, latency_us: u64) {
        self.served.fetch_add(1, Ordering::Relaxed);
        if potable {
            self.potable.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let served = self.served.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if served > 0 { sum as f64 / served as f64 } else { 0.0 };

        StatsSnapshot {
            predictions_served: served,
            predictions_rejected: self.rejected.load(Ordering::Relaxed),
            potable_count: self.potable.load(Ordering::Relaxed),
            avg_latency_us: avg,
        }
    }
}
