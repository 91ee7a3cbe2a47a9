//! Console handlers
//!
//! Runs parsed commands against the cache and renders one JSON line per command.

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::EntityCache;
use crate::console::{Command, CommandError};
use crate::models::{Entity, EntityResponse, ErrorResponse, MessageResponse, StatsResponse};
use crate::store::BackingStore;

/// What the console loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this JSON document
    Print(String),
    /// Nothing to print
    Skip,
    /// Stop reading input
    Quit,
}

/// Parses and executes one input line.
pub async fn handle_line<S>(cache: &EntityCache<Entity, S>, line: &str) -> Reply
where
    S: BackingStore<Entity>,
{
    match Command::parse(line) {
        Ok(Some(command)) => execute(cache, command).await,
        Ok(None) => Reply::Skip,
        Err(err) => Reply::Print(render(&bad_command(&err))),
    }
}

/// Executes a parsed command.
pub async fn execute<S>(cache: &EntityCache<Entity, S>, command: Command) -> Reply
where
    S: BackingStore<Entity>,
{
    debug!(?command, "Executing console command");

    let rendered = match command {
        Command::Add(entity) => match cache.add(entity).await {
            Ok(saved) => render(&EntityResponse::new(saved)),
            Err(err) => render(&ErrorResponse::from(&err)),
        },
        Command::Get(id) => match cache.get(id).await {
            Ok(entity) => render(&EntityResponse::new(entity)),
            Err(err) => render(&ErrorResponse::from(&err)),
        },
        Command::Remove(id) => match cache.remove(id).await {
            Ok(()) => render(&MessageResponse::new("entity removed")),
            Err(err) => render(&ErrorResponse::from(&err)),
        },
        Command::RemoveAll => {
            info!("Removing all entities from cache and store");
            cache.remove_all().await;
            render(&MessageResponse::new("all entities removed"))
        }
        Command::Clear => {
            info!("Clearing cache (store untouched)");
            cache.clear().await;
            render(&MessageResponse::new("cache cleared"))
        }
        Command::Stats => render(&StatsResponse::from(cache.stats().await)),
        Command::Quit => return Reply::Quit,
    };

    Reply::Print(rendered)
}

fn bad_command(err: &CommandError) -> ErrorResponse {
    ErrorResponse::new("bad_command", err.to_string())
}

fn render<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|err| {
        format!(
            r#"{{"error":"failed to render response: {}","kind":"internal"}}"#,
            err
        )
    })
}
