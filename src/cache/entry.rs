//! Cache Entry Module
//!
//! Defines the in-memory wrapper pairing a cached value with its last access time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached value and the moment it was last read or written.
///
/// Uses `tokio::time::Instant` so paused-clock tests can drive expiration.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,
    /// Last time the entry was inserted or served
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry whose last access is `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has been idle for longer than `ttl`.
    ///
    /// Boundary condition: an entry idle for exactly `ttl` is still fresh.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.idle(now) > ttl
    }

    // == Idle ==
    /// Time elapsed since the last access. Saturates at zero.
    pub fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_access)
    }

    // == Touch ==
    /// Refreshes the access time.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}
