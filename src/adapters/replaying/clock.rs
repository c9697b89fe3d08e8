//! Replaying adapter for the `Clock` port.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock readings from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics when the cassette has no readings left.
    fn now(&self) -> DateTime<Utc> {
        self.replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_reading()
    }
}
