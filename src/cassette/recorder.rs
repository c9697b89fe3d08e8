//! Records clock readings into a cassette file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::format::ClockCassette;

/// Collects clock readings and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    readings: Vec<DateTime<Utc>>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            readings: Vec::new(),
        }
    }

    /// Append a reading.
    pub fn record(&mut self, reading: DateTime<Utc>) {
        self.readings.push(reading);
    }

    /// Number of readings captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = ClockCassette {
            name: self.name,
            recorded_at: Utc::now(),
            readings: self.readings,
        };
        let yaml = serde_yaml::to_string(&cassette)
            .map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
