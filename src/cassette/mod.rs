//! Clock cassettes for recording and replaying time readings.

pub mod format;
pub mod recorder;
pub mod replayer;
