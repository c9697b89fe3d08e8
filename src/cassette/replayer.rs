//! Replays recorded clock readings from a cassette.

use chrono::{DateTime, Utc};

use super::format::ClockCassette;

/// Serves readings from a loaded cassette in recorded order.
#[derive(Debug)]
pub struct CassetteReplayer {
    name: String,
    readings: Vec<DateTime<Utc>>,
    cursor: usize,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &ClockCassette) -> Self {
        Self {
            name: cassette.name.clone(),
            readings: cassette.readings.clone(),
            cursor: 0,
        }
    }

    /// Readings not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.readings.len() - self.cursor
    }

    /// Return the next recorded reading.
    ///
    /// # Panics
    ///
    /// Panics once every reading has been served, naming the cassette and
    /// how many readings it held.
    pub fn next_reading(&mut self) -> DateTime<Utc> {
        assert!(
            self.cursor < self.readings.len(),
            "Cassette exhausted: all {count} readings in {name:?} have been consumed",
            count = self.readings.len(),
            name = self.name,
        );
        let reading = self.readings[self.cursor];
        self.cursor += 1;
        reading
    }
}
