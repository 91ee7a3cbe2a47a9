//! Cache Module
//!
//! Bounded write-through cache with idle expiration and write-back on eviction.

mod entry;
mod facade;
mod recency;
mod state;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use facade::EntityCache;
pub use recency::RecencyMap;
pub use stats::CacheStats;

pub(crate) use state::CacheState;
