//! Monotonic serial generation and seen-set tracking.
//!
//! A [`Generator`] owns two independently locked cells:
//!
//! ```text
//! ratchet  RwLock<Serial>            generate
//! history  RwLock<HashSet<Serial>>   set_seen / seen / consume / expire_seen
//! ```
//!
//! Readers of the seen set never wait on serial generation, and vice versa.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::adapters::live::LiveClock;
use crate::ports::Clock;
use crate::serial::Serial;

/// Issues strictly increasing serials and remembers which ones were seen.
///
/// Create one per problem domain and share it by reference or `Arc`.
///
/// The seen set is never pruned on its own. Owners that mark serials seen
/// must call [`Generator::expire_seen`] on a schedule, or memory grows
/// without bound.
pub struct Generator {
    clock: Box<dyn Clock>,
    ratchet: RwLock<Serial>,
    history: RwLock<HashSet<Serial>>,
}

impl Generator {
    /// Creates a generator reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(LiveClock))
    }

    /// Creates a generator reading time from `clock`.
    ///
    /// Every call to [`generate`](Self::generate), [`now`](Self::now) and
    /// [`expire_seen`](Self::expire_seen) reads the clock exactly once.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            ratchet: RwLock::new(Serial::MIN),
            history: RwLock::new(HashSet::new()),
        }
    }

    /// Issues a serial no earlier than the current epoch time in nanoseconds.
    ///
    /// Each call returns a value strictly greater than every value this
    /// generator returned before. When the clock has not moved past the last
    /// issued serial (a burst of calls, or the clock stepping backwards) the
    /// result is the last serial plus one.
    ///
    /// # Panics
    ///
    /// Panics if the ratchet has already issued `i64::MAX`, which the system
    /// clock cannot reach before the year 2262. Use
    /// [`try_generate`](Self::try_generate) when the clock is untrusted.
    #[must_use]
    pub fn generate(&self) -> Serial {
        self.try_generate()
            .unwrap_or_else(|| panic!("serial ratchet exhausted at {}", self.last_issued()))
    }

    /// Like [`generate`](Self::generate), but returns `None` instead of
    /// panicking once `i64::MAX` has been issued. The ratchet is left
    /// untouched in that case.
    #[must_use]
    pub fn try_generate(&self) -> Option<Serial> {
        let mut last = self.ratchet.write().unwrap_or_else(PoisonError::into_inner);
        let now = self.now();
        let issued = if now > *last {
            now
        } else {
            let next = Serial::from_i64(last.as_i64().checked_add(1)?);
            tracing::trace!(
                clock = now.as_i64(),
                issued = next.as_i64(),
                "clock behind ratchet"
            );
            next
        };
        *last = issued;
        Some(issued)
    }

    /// Reads the clock as a serial without advancing the ratchet.
    #[must_use]
    pub fn now(&self) -> Serial {
        Serial::from_datetime(self.clock.now())
    }

    /// Returns the most recently issued serial, or [`Serial::MIN`] if none.
    #[must_use]
    pub fn last_issued(&self) -> Serial {
        *self.ratchet.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns whether `serial` has been marked seen and not yet expired.
    #[must_use]
    pub fn seen(&self, serial: Serial) -> bool {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&serial)
    }

    /// Marks `serial` as seen. Marking it again has no further effect.
    ///
    /// Any value may be marked, including ones this generator never issued.
    pub fn set_seen(&self, serial: Serial) {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(serial);
    }

    /// Marks `serial` as seen and reports whether it was fresh.
    ///
    /// Returns `false` if it had already been seen. The check and the mark
    /// happen under one lock, so two callers racing on the same nonce
    /// cannot both see `true`.
    pub fn consume(&self, serial: Serial) -> bool {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(serial)
    }

    /// Forgets seen serials older than `age_limit`.
    ///
    /// Serials are read as nanosecond timestamps. Every entry strictly below
    /// `now - age_limit` is removed; entries at or after that cutoff stay,
    /// including serials from the future. An age limit of zero clears
    /// everything marked before the call.
    pub fn expire_seen(&self, age_limit: Duration) {
        let cutoff = self.now().saturating_sub(age_limit);
        self.expire_seen_before(cutoff);
    }

    /// Forgets seen serials strictly below `cutoff`.
    pub(crate) fn expire_seen_before(&self, cutoff: Serial) {
        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        let before = history.len();
        history.retain(|serial| *serial >= cutoff);
        tracing::debug!(
            removed = before - history.len(),
            remaining = history.len(),
            cutoff = cutoff.as_i64(),
            "expired seen serials"
        );
    }

    /// Number of serials currently marked seen.
    #[must_use]
    pub fn seen_len(&self) -> usize {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the seen set is empty.
    #[must_use]
    pub fn seen_is_empty(&self) -> bool {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("last_issued", &self.last_issued())
            .field("seen", &self.seen_len())
            .finish_non_exhaustive()
    }
}
