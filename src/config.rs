//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default capacity of the recency map.
pub const DEFAULT_MAX_SIZE: usize = 5;

/// Default idle expiration (and sweep period) in milliseconds.
pub const DEFAULT_EXPIRATION_MILLIS: u64 = 60_000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries held in memory
    pub max_size: usize,
    /// Idle time after which an entry expires; also the sweeper period
    pub expiration_millis: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Recency map capacity (default: 5)
    /// - `CACHE_EXPIRATION_MILLIS` - Entry TTL and sweep period (default: 60000)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
            expiration_millis: env::var("CACHE_EXPIRATION_MILLIS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_EXPIRATION_MILLIS),
        }
    }

    /// Sets the recency map capacity.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the expiration threshold in milliseconds.
    pub fn with_expiration_millis(mut self, millis: u64) -> Self {
        self.expiration_millis = millis;
        self
    }

    /// Expiration threshold as a Duration.
    pub fn expiration(&self) -> Duration {
        Duration::from_millis(self.expiration_millis)
    }

    /// Rejects configurations the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidInput(
                "max_size must be greater than zero".to_string(),
            ));
        }
        // The sweeper period equals the expiration, and a zero period timer is invalid.
        if self.expiration_millis == 0 {
            return Err(CacheError::InvalidInput(
                "expiration_millis must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            expiration_millis: DEFAULT_EXPIRATION_MILLIS,
        }
    }
}
