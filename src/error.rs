//! Error types for the watch pipeline.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors surfaced by the pipeline and its collaborators.
///
/// Cancellation is deliberately absent: it is a normal termination path,
/// reported as `None`/`false` by the blocking calls, never as an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal setup failed. Fatal, raised before any role starts.
    #[error("terminal setup failed: {0}")]
    Terminal(#[source] io::Error),

    /// The watched command could not be launched.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        /// The program that failed to start.
        command: String,
        /// The underlying launch failure.
        #[source]
        source: io::Error,
    },

    /// The watched command ran but exited unsuccessfully.
    #[error("command failed: {status}")]
    Exit {
        /// The child's exit status.
        status: ExitStatus,
    },

    /// The configuration names no command to run.
    #[error("no command to run")]
    EmptyCommand,

    /// Any other I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
