//! The `Serial` identifier type.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 64-bit identifier issued by a [`Generator`](crate::Generator).
///
/// The value is the number of nanoseconds since the Unix epoch at the time
/// of issue, possibly pushed forward by the ratchet. Callers should treat it
/// as opaque beyond ordering and equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Serial(i64);

impl Serial {
    /// The smallest representable serial; the ratchet starts here.
    pub const MIN: Self = Self(i64::MIN);

    /// Wraps a raw integer.
    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Converts a point in time to its nanosecond serial.
    ///
    /// Times outside the nanosecond range (roughly 1677 to 2262) saturate
    /// to the nearest bound.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        match time.timestamp_nanos_opt() {
            Some(nanos) => Self(nanos),
            None if time.timestamp() < 0 => Self(i64::MIN),
            None => Self(i64::MAX),
        }
    }

    /// Moves the serial `age` earlier, stopping at [`Serial::MIN`].
    #[must_use]
    pub fn saturating_sub(self, age: Duration) -> Self {
        let nanos = i64::try_from(age.as_nanos()).unwrap_or(i64::MAX);
        Self(self.0.saturating_sub(nanos))
    }

    /// Interprets the serial as a nanosecond timestamp.
    #[must_use]
    pub fn issued_at(self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

impl From<i64> for Serial {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Serial> for i64 {
    fn from(serial: Serial) -> Self {
        serial.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Serial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid serial {s:?}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_and_displays_decimal() {
        let serial: Serial = " 1718447400000000000 ".parse().unwrap();
        assert_eq!(serial.as_i64(), 1_718_447_400_000_000_000);
        assert_eq!(serial.to_string(), "1718447400000000000");
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<Serial>().unwrap_err();
        assert!(err.contains("Invalid serial"));
    }

    #[test]
    fn datetime_conversion_keeps_nanoseconds() {
        let time = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(42);
        let serial = Serial::from_datetime(time);
        assert_eq!(serial.issued_at(), time);
    }

    #[test]
    fn out_of_range_times_saturate() {
        let far_future = Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap();
        let far_past = Utc.with_ymd_and_hms(1600, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Serial::from_datetime(far_future).as_i64(), i64::MAX);
        assert_eq!(Serial::from_datetime(far_past), Serial::MIN);
    }

    #[test]
    fn saturating_sub_stops_at_min() {
        let serial = Serial::from_i64(1_500);
        let earlier = serial.saturating_sub(Duration::from_nanos(500));
        assert_eq!(earlier.as_i64(), 1_000);
        let floor = Serial::from_i64(-1).saturating_sub(Duration::MAX);
        assert_eq!(floor, Serial::MIN);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&Serial::from_i64(17)).unwrap();
        assert_eq!(json, "17");
        let back: Serial = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Serial::from(17));
    }
}
