//! Port traits defining external boundaries.
//!
//! The generator's only outside dependency is the wall clock. Implementations
//! live in `src/adapters/`.

pub mod clock;

pub use clock::Clock;
