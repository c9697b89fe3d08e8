//! System wall clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the operating system's real-time clock.
///
/// Readings may step backwards when the system clock is adjusted; the
/// generator's ratchet absorbs that.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
