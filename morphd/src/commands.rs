//! # Host Commands
//!
//! Colon-prefixed commands that operate on the design rather than the
//! pointer:
//!
//! - `:rename NAME` - Rename the focused object (hovered, else selected)
//! - `:save PATH` - Save the design as JSON
//! - `:load PATH` - Replace the design with a saved one
//! - `:show` - Print a summary of the current design
//! - `:quit` - Stop replaying the script

use std::path::PathBuf;
use thiserror::Error;

/// Host command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostCommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Rename the focused object
    Rename { name: String },

    /// Save the design
    Save { path: PathBuf },

    /// Load a design, replacing the current one
    Load { path: PathBuf },

    /// Print the design summary
    Show,

    /// Stop the host
    Quit,
}

/// Host command parser
pub struct HostCommandParser;

impl HostCommandParser {
    /// Parses a command string, with or without the leading `:`
    pub fn parse(input: &str) -> Result<HostCommand, HostCommandError> {
        let input = input.trim();
        let input = input.strip_prefix(':').unwrap_or(input).trim_start();

        if input.is_empty() {
            return Err(HostCommandError::InvalidCommand(
                "Empty command".to_string(),
            ));
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        match verb.to_lowercase().as_str() {
            // Names may contain spaces; the rest of the line is the name
            "rename" => Ok(HostCommand::Rename {
                name: Self::required(rest, "rename requires a name")?.to_string(),
            }),
            "save" | "w" => Ok(HostCommand::Save {
                path: PathBuf::from(Self::required(rest, "save requires a path")?),
            }),
            "load" | "e" => Ok(HostCommand::Load {
                path: PathBuf::from(Self::required(rest, "load requires a path")?),
            }),
            "show" => Self::no_arguments(rest, HostCommand::Show),
            "quit" | "q" => Self::no_arguments(rest, HostCommand::Quit),
            _ => Err(HostCommandError::UnknownCommand(verb.to_string())),
        }
    }

    fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, HostCommandError> {
        if value.is_empty() {
            Err(HostCommandError::MissingArgument(message.to_string()))
        } else {
            Ok(value)
        }
    }

    fn no_arguments(rest: &str, command: HostCommand) -> Result<HostCommand, HostCommandError> {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(HostCommandError::InvalidCommand(format!(
                "unexpected argument: {}",
                rest
            )))
        }
    }
}
