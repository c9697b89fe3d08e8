//! Monotonic nanosecond serials with a seen-set for nonce and anti-replay use.
//!
//! ```
//! use std::time::Duration;
//! use serial::Generator;
//!
//! let generator = Generator::new();
//! let nonce = generator.generate();
//! assert!(generator.consume(nonce));
//! assert!(!generator.consume(nonce));
//!
//! // Owners are responsible for pruning the seen set.
//! generator.expire_seen(Duration::from_secs(300));
//! ```

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod generator;
pub mod ports;
pub mod serial;

pub use generator::Generator;
pub use serial::Serial;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, configuration is
/// invalid, or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)
        .map_err(|err| err.to_string())?;
    let config = config::Config::from_env()?;
    commands::dispatch(&cli.command, &config)
}
