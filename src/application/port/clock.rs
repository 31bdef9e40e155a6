// SPDX-License-Identifier: MPL-2.0
//! Timer port.
//!
//! Delayed events (the gift reveal) are scheduled through a [`Clock`] so the
//! state machines stay deterministic under test. The clock only hands out
//! ids; the firing itself is routed back by the caller (`on_timer(id)`).

use std::time::Duration;

/// Identifier of one scheduled firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

pub trait Clock {
    /// Schedules a single firing after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a pending firing. Cancelling an unknown or already fired id
    /// is a no-op.
    fn cancel(&mut self, id: TimerId);
}
