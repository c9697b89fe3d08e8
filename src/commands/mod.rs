//! Command dispatch and handlers.

pub mod check;
pub mod generate;

use std::io;
use std::time::Duration;

use crate::cli::Command;
use crate::config::Config;

/// Dispatch a parsed command to its handler.
///
/// When `SERIAL_RECORD` is set to a file path and `generate` has no explicit
/// `--record`/`--replay`, clock readings are recorded to that file.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    match command {
        Command::Generate {
            count,
            json,
            record,
            replay,
        } => {
            let record = match (record, replay) {
                (Some(path), _) => Some(path.as_path()),
                (None, None) => config.record.as_deref(),
                (None, Some(_)) => None,
            };
            let mut out = io::stdout().lock();
            generate::run(*count, *json, record, replay.as_deref(), &mut out)
        }
        Command::Check { max_age_ms } => {
            let max_age = max_age_ms.map_or(config.max_age, Duration::from_millis);
            let mut input = io::stdin().lock();
            let mut out = io::stdout().lock();
            check::run(max_age, &mut input, &mut out)
        }
    }
}
