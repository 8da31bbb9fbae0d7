//! Run configuration, built once at startup.

use crate::error::Error;
use std::time::Duration;

/// Settings for one watch run.
///
/// Constructed from the CLI in `main` and handed by value to the roles
/// that need it; nothing in the pipeline reads mutable global state.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// The command to run and its arguments.
    pub command: Vec<String>,
    /// Delay between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Whether each cycle prepends a header line (timestamp, interval,
    /// command) to the output.
    pub title: bool,
}

impl WatchConfig {
    /// Validate and build a configuration.
    pub fn new(command: Vec<String>, interval: Duration, title: bool) -> Result<Self, Error> {
        if command.first().is_none_or(|program| program.is_empty()) {
            return Err(Error::EmptyCommand);
        }
        Ok(Self {
            command,
            interval,
            title,
        })
    }

    /// The command rendered as one shell-style line, for headers and
    /// error notices.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
