//! Guarded cache state
//!
//! Everything the single cache lock protects: the recency map and its counters.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::cache::{CacheStats, RecencyMap};

/// State shared by the facade and the expiration sweeper.
#[derive(Debug)]
pub(crate) struct CacheState<K, V> {
    pub(crate) entries: RecencyMap<K, V>,
    pub(crate) stats: CacheStats,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: RecencyMap::new(capacity),
            stats: CacheStats::new(),
        }
    }

    /// Drops every entry idle for longer than `ttl`. Returns how many were dropped.
    ///
    /// Expired entries are not written back; they were persisted before they
    /// could be cached.
    pub(crate) fn purge_expired(&mut self, ttl: Duration, now: Instant) -> usize {
        let removed = self.entries.retain(|key, entry| {
            let expired = entry.is_expired(ttl, now);
            if expired {
                info!(id = ?key, "Removed expired entity from cache");
            }
            !expired
        });

        self.stats.record_expirations(removed);
        self.sync_size();
        removed
    }

    pub(crate) fn sync_size(&mut self) {
        self.stats.set_total_entries(self.entries.len());
    }
}
