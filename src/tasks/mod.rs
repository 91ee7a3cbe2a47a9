//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiration sweep: drops idle cache entries once per TTL period

mod sweeper;

pub use sweeper::Sweeper;
pub(crate) use sweeper::spawn_sweeper;
