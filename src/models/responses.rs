//! Response documents for the console
//!
//! Each command prints exactly one of these as a JSON line.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::CacheError;
use crate::models::Entity;

/// Response for `add` and `get`
#[derive(Debug, Clone, Serialize)]
pub struct EntityResponse {
    pub entity: Entity,
}

impl EntityResponse {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
}

/// Response for commands that only report success
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for `stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub write_back_failures: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Snapshot time in RFC 3339 format
    pub timestamp: String,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            write_back_failures: stats.write_back_failures,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Error kind (`invalid_input`, `not_found`, `store_error`, `bad_command`)
    pub kind: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.into(),
        }
    }
}

impl From<&CacheError> for ErrorResponse {
    fn from(err: &CacheError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}
