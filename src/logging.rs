//! Logging setup, kept away from the terminal the renderer owns.
//!
//! Frames own stdout, so by default nothing is logged at all. Point
//! `--log-file` at a path to capture events there; the `RESPIN_LOG`
//! environment variable controls the filter either way (for example
//! `RESPIN_LOG=respin=debug`).

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter.
pub const FILTER_ENV: &str = "RESPIN_LOG";

/// Install the global tracing subscriber.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let filter =
                EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            // No file: stay silent unless RESPIN_LOG explicitly asks for
            // stderr output (useful when debugging screenless).
            let filter =
                EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
