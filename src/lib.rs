//! Entity Cache - a bounded write-through cache in front of a durable store
//!
//! Provides LRU eviction with write-back, idle expiration and a single
//! exclusive guard over cache and store access.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use cache::EntityCache;
pub use config::Config;
pub use error::{CacheError, Result, StoreError};
pub use store::{BackingStore, Identifiable, MemoryStore};
