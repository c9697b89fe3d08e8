//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Source of wall-clock time for serial issuance and seen-set expiry.
///
/// Implementations need not be monotonic.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
