//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `serial`.
#[derive(Debug, Parser)]
#[command(name = "serial", version, about = "Issue monotonic serials and detect replayed nonces")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print freshly issued serials, one per line.
    Generate {
        /// How many serials to issue.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Print each serial as a JSON object with its issue time.
        #[arg(long)]
        json: bool,
        /// Record clock readings to this cassette file.
        #[arg(long, value_name = "PATH", conflicts_with = "replay")]
        record: Option<PathBuf>,
        /// Read the clock from a recorded cassette instead of the system.
        #[arg(long, value_name = "PATH")]
        replay: Option<PathBuf>,
    },
    /// Read serials from stdin and report fresh, replayed, or stale ones.
    Check {
        /// Forget seen serials older than this many milliseconds.
        #[arg(long, value_name = "MS")]
        max_age_ms: Option<u64>,
    },
}
