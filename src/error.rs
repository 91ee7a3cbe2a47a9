//! Error types for the entity cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error ==
/// Failure reported by a backing store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or refused the call
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store accepted the call but failed to complete it
    #[error("store backend failure: {0}")]
    Backend(String),
}

// == Cache Error Enum ==
/// Unified error type for the cache facade.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Missing value or key; rejected before any side effect
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key absent from both the cache and the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backing store failed while serving the operation
    #[error("Store error: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },
}

impl CacheError {
    /// Wraps a store failure with a description of the operation that hit it.
    pub fn store(context: impl Into<String>, source: StoreError) -> Self {
        CacheError::Store {
            context: context.into(),
            source,
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CacheError::InvalidInput(_) => "invalid_input",
            CacheError::NotFound(_) => "not_found",
            CacheError::Store { .. } => "store_error",
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
