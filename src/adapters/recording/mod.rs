//! Recording adapters that capture readings to cassettes.

pub mod clock;

pub use clock::RecordingClock;
