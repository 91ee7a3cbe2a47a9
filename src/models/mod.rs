//! Data models for the entity cache
//!
//! The cached record type and the JSON documents printed by the console.

pub mod entity;
pub mod responses;

// Re-export commonly used types
pub use entity::Entity;
pub use responses::{EntityResponse, ErrorResponse, MessageResponse, StatsResponse};
