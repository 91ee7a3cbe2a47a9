//! Cache Statistics Module
//!
//! Tracks hits, misses, evictions, write-back failures and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Cache activity counters, updated under the cache guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads served from memory
    pub hits: u64,
    /// Reads that had to consult the backing store
    pub misses: u64,
    /// Entries pushed out by the capacity limit
    pub evictions: u64,
    /// Evicted entries the store refused to persist
    pub write_back_failures: u64,
    /// Entries dropped for being idle too long
    pub expirations: u64,
    /// Current number of entries in memory
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_write_back_failure(&mut self) {
        self.write_back_failures += 1;
    }

    /// Adds `count` expired entries to the running total.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
