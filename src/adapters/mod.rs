//! Clock adapters: live, recording, and replaying.

pub mod live;
pub mod recording;
pub mod replaying;
