//! Lookup and load counters for one translator.
//!
//! Counters are lock-free so recording a lookup never contends with other
//! request handlers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by a single [`Translator`](crate::i18n::Translator).
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups answered from a catalog
    hits: AtomicUsize,

    /// Lookups that fell back to the original string
    misses: AtomicUsize,

    /// Loads that replaced the catalogs
    loads: AtomicUsize,

    /// Loads that failed and left the previous catalogs in place
    load_failures: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup that found a translation.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that found no translation.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful load.
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed load.
    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let total_lookups = hits + misses;
        let hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            misses,
            hit_rate,
            loads: self.loads(),
            load_failures: self.load_failures(),
        }
    }
}

/// Metrics report containing current lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of lookups answered from a catalog
    pub hits: usize,

    /// Number of lookups that returned the original string
    pub misses: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    /// Number of successful loads
    pub loads: usize,

    /// Number of failed loads
    pub load_failures: usize,
}
