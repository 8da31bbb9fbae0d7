//! Respin CLI binary.

use anyhow::Context;
use clap::Parser;
use respin::{logging, pipeline, WatchConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Rerun a command on an interval and repaint the terminal.
///
/// Quit with `q`, `Esc`, or `Ctrl-C`.
#[derive(Parser)]
#[command(name = "respin", version, about)]
struct Cli {
    /// Seconds to wait between updates (minimum 1)
    #[arg(short = 'n', long, default_value_t = 1)]
    interval: u64,

    /// Skip the header line at the top of each frame
    #[arg(long)]
    no_title: bool,

    /// Append tracing output to this file (the terminal itself is busy)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// The command to run, with its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref()).context("failed to set up logging")?;

    let config = WatchConfig::new(
        cli.command,
        Duration::from_secs(cli.interval.max(1)),
        !cli.no_title,
    )?;

    pipeline::run(&config).context("watch failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_interval_and_command() {
        let cli = Cli::try_parse_from(["respin", "-n", "5", "ls", "-la"]).unwrap();
        assert_eq!(cli.interval, 5);
        assert_eq!(cli.command, vec!["ls", "-la"]);
        assert!(!cli.no_title);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["respin", "date"]).unwrap();
        assert_eq!(cli.interval, 1);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["respin", "-n", "2"]).is_err());
    }
}
