//! Replaying adapters that serve previously recorded readings.

pub mod clock;

pub use clock::ReplayingClock;
