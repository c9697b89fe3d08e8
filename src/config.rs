//! Environment-driven settings for the `serial` binary.

use std::path::PathBuf;
use std::time::Duration;

/// Settings read from the process environment.
///
/// `.env` files are loaded by the binary before this is built, so values
/// there behave like exported variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Age after which seen serials are forgotten (`SERIAL_MAX_AGE_MS`).
    pub max_age: Duration,
    /// Cassette path for recording clock readings (`SERIAL_RECORD`).
    pub record: Option<PathBuf>,
}

impl Config {
    /// Seen-set age limit used when nothing else is configured.
    pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let max_age = match lookup("SERIAL_MAX_AGE_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("Invalid SERIAL_MAX_AGE_MS {raw:?}: {e}"))?,
            None => Self::DEFAULT_MAX_AGE,
        };
        let record = lookup("SERIAL_RECORD")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Ok(Self { max_age, record })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age: Self::DEFAULT_MAX_AGE,
            record: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_age, Duration::from_millis(300_000));
    }

    #[test]
    fn reads_max_age_and_record_path() {
        let config = Config::from_lookup(lookup_in(&[
            ("SERIAL_MAX_AGE_MS", " 1500 "),
            ("SERIAL_RECORD", "/tmp/clock.cassette.yaml"),
        ]))
        .unwrap();
        assert_eq!(config.max_age, Duration::from_millis(1500));
        assert_eq!(
            config.record,
            Some(PathBuf::from("/tmp/clock.cassette.yaml"))
        );
    }

    #[test]
    fn empty_record_path_is_ignored() {
        let vars = [("SERIAL_RECORD", "")];
        let config = Config::from_lookup(lookup_in(&vars)).unwrap();
        assert!(config.record.is_none());
    }

    #[test]
    fn rejects_unparseable_max_age() {
        let vars = [("SERIAL_MAX_AGE_MS", "soon")];
        let err = Config::from_lookup(lookup_in(&vars)).unwrap_err();
        assert!(err.contains("SERIAL_MAX_AGE_MS"));
    }
}
