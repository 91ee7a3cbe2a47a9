//! Console Module
//!
//! Line-oriented command surface used by the `entity-cache` binary.
//!
//! # Commands
//! - `add <entity json>` - Save an entity and cache it
//! - `get <id>` - Fetch an entity from the cache or the store
//! - `remove <id>` - Delete an entity from the cache and the store
//! - `remove-all` - Empty the cache and the store
//! - `clear` - Empty the cache only
//! - `stats` - Print cache counters
//! - `quit` - Shut down

pub mod commands;
pub mod handlers;

pub use commands::{Command, CommandError};
pub use handlers::{execute, handle_line, Reply};
