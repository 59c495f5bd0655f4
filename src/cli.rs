//! CLI command implementations for Ludo.

pub(crate) mod check;
pub(crate) mod play;
pub(crate) mod sim;
pub(crate) mod watch;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `play` summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `sim` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludo::BoardError> for CliError {
    fn from(e: ludo::BoardError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludo::RosterError> for CliError {
    fn from(e: ludo::RosterError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludo::SetupError> for CliError {
    fn from(e: ludo::SetupError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludo::CoordinatorError> for CliError {
    fn from(e: ludo::CoordinatorError) -> Self {
        Self::new(e.to_string())
    }
}

/// Seed from the wall clock when none was given.
pub(crate) fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            #[allow(clippy::cast_possible_truncation)]
            let nanos = d.as_nanos() as u64;
            nanos
        })
        .unwrap_or(42)
}
