//! Console command parsing
//!
//! One command per input line: a verb, optionally followed by an argument.

use thiserror::Error;

use crate::models::Entity;

/// A parsed console command.
///
/// A missing argument is kept as `None` so the cache reports it as invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <entity json>`
    Add(Option<Entity>),
    /// `get <id>`
    Get(Option<i64>),
    /// `remove <id>`
    Remove(Option<i64>),
    /// `remove-all`
    RemoveAll,
    /// `clear`
    Clear,
    /// `stats`
    Stats,
    /// `quit` / `exit`
    Quit,
}

/// Reasons a line could not be turned into a [`Command`].
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("{0} takes no argument")]
    UnexpectedArgument(String),

    #[error("invalid entity JSON: {0}")]
    InvalidEntity(#[from] serde_json::Error),
}

impl Command {
    /// Parses a single line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then_some(rest);

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => Command::Add(argument.map(serde_json::from_str).transpose()?),
            "get" => Command::Get(parse_id(argument)?),
            "remove" | "del" => Command::Remove(parse_id(argument)?),
            "remove-all" => no_argument(verb, argument, Command::RemoveAll)?,
            "clear" => no_argument(verb, argument, Command::Clear)?,
            "stats" => no_argument(verb, argument, Command::Stats)?,
            "quit" | "exit" => no_argument(verb, argument, Command::Quit)?,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn no_argument(
    verb: &str,
    argument: Option<&str>,
    command: Command,
) -> Result<Command, CommandError> {
    match argument {
        Some(_) => Err(CommandError::UnexpectedArgument(verb.to_string())),
        None => Ok(command),
    }
}

fn parse_id(argument: Option<&str>) -> Result<Option<i64>, CommandError> {
    argument
        .map(|raw| {
            raw.parse()
                .map_err(|_| CommandError::InvalidId(raw.to_string()))
        })
        .transpose()
}
