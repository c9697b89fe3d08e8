//! Cassette data structures for recorded clock readings.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded sequence of clock readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockCassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Clock readings in the order they were taken.
    pub readings: Vec<DateTime<Utc>>,
}

impl ClockCassette {
    /// Load a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// reading cannot be expressed as epoch nanoseconds (before 1677 or
    /// after 2262).
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Self = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        if let Some(index) = cassette
            .readings
            .iter()
            .position(|reading| reading.timestamp_nanos_opt().is_none())
        {
            return Err(format!(
                "Cassette {} reading {index} is outside the nanosecond range",
                path.display()
            ));
        }
        Ok(cassette)
    }
}
