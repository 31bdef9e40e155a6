// SPDX-License-Identifier: MPL-2.0
//! The gift reveal state machine.
//!
//! Each activation moves the gift one stage forward. The first step of a
//! cycle asks for the companion audio to start; the last step schedules a
//! single "reveal complete" firing through the [`Clock`] port. Once the
//! ticket is revealed the cycle is over until [`UnwrapSequence::reset`].

use crate::application::port::{Clock, TimerId};
use crate::config::DEFAULT_REVEAL_DELAY_MS;
use crate::domain::unwrap::{UnwrapStage, UnwrapState};
use std::time::Duration;

/// Effect of one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnwrapStep {
    pub stage: UnwrapStage,
    /// Set on the Closed → BowUndone transition only.
    pub start_special_audio: bool,
}

/// Emitted once the ticket has been on display for the reveal delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealComplete {
    pub reset_token: u64,
}

#[derive(Debug, Clone)]
pub struct UnwrapSequence {
    state: UnwrapState,
    reveal_delay: Duration,
    pending_reveal: Option<TimerId>,
}

impl Default for UnwrapSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl UnwrapSequence {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: UnwrapState::default(),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            pending_reveal: None,
        }
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> UnwrapState {
        self.state
    }

    #[must_use]
    pub fn stage(&self) -> UnwrapStage {
        self.state.stage
    }

    /// Whether a reveal firing is still outstanding.
    #[must_use]
    pub fn reveal_pending(&self) -> bool {
        self.pending_reveal.is_some()
    }

    /// Advances one stage. Returns `None` once the ticket is revealed.
    pub fn activate<C: Clock + ?Sized>(&mut self, clock: &mut C) -> Option<UnwrapStep> {
        let next = self.state.stage.next()?;
        let start_special_audio = self.state.stage == UnwrapStage::Closed;
        self.state.stage = next;

        if next == UnwrapStage::TicketRevealed {
            self.pending_reveal = Some(clock.schedule(self.reveal_delay));
        }

        tracing::debug!(stage = ?next, "gift unwrapped a step");

        Some(UnwrapStep {
            stage: next,
            start_special_audio,
        })
    }

    /// Routes a clock firing. Only the currently scheduled reveal completes.
    pub fn on_timer(&mut self, id: TimerId) -> Option<RevealComplete> {
        if self.pending_reveal != Some(id) {
            return None;
        }
        self.pending_reveal = None;
        Some(RevealComplete {
            reset_token: self.state.reset_token,
        })
    }

    /// Re-closes the gift and cancels a pending reveal.
    pub fn reset<C: Clock + ?Sized>(&mut self, clock: &mut C) {
        if let Some(id) = self.pending_reveal.take() {
            clock.cancel(id);
        }
        self.state.stage = UnwrapStage::Closed;
        self.state.reset_token += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::ManualClock;

    #[test]
    fn three_activations_reveal_the_ticket() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new();

        let first = gift.activate(&mut clock).expect("step");
        assert_eq!(first.stage, UnwrapStage::BowUndone);
        assert!(first.start_special_audio);

        let second = gift.activate(&mut clock).expect("step");
        assert_eq!(second.stage, UnwrapStage::LidOpen);
        assert!(!second.start_special_audio);
        assert!(clock.pending().is_empty());

        let third = gift.activate(&mut clock).expect("step");
        assert_eq!(third.stage, UnwrapStage::TicketRevealed);
        assert_eq!(clock.pending().len(), 1);
        assert_eq!(clock.pending()[0].1, Duration::from_secs(3));
    }

    #[test]
    fn fourth_activation_is_noop() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new();
        for _ in 0..3 {
            gift.activate(&mut clock);
        }
        assert_eq!(gift.activate(&mut clock), None);
        assert_eq!(gift.stage(), UnwrapStage::TicketRevealed);
        assert_eq!(clock.pending().len(), 1);
    }

    #[test]
    fn reveal_completes_once() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new();
        for _ in 0..3 {
            gift.activate(&mut clock);
        }

        let fired = clock.fire_all();
        assert_eq!(
            gift.on_timer(fired[0]),
            Some(RevealComplete { reset_token: 0 })
        );
        assert_eq!(gift.on_timer(fired[0]), None);
        assert_eq!(gift.stage(), UnwrapStage::TicketRevealed);
    }

    #[test]
    fn reset_cancels_pending_reveal() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new();
        for _ in 0..3 {
            gift.activate(&mut clock);
        }
        let stale = clock.pending()[0].0;

        gift.reset(&mut clock);
        assert_eq!(gift.stage(), UnwrapStage::Closed);
        assert_eq!(gift.state().reset_token, 1);
        assert_eq!(clock.cancelled(), &[stale]);
        assert_eq!(gift.on_timer(stale), None);
    }

    #[test]
    fn reset_starts_a_new_cycle_with_audio() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new();
        gift.activate(&mut clock);
        gift.reset(&mut clock);

        let step = gift.activate(&mut clock).expect("step");
        assert!(step.start_special_audio);
    }

    #[test]
    fn custom_delay_is_used() {
        let mut clock = ManualClock::new();
        let mut gift = UnwrapSequence::new().with_reveal_delay(Duration::from_millis(250));
        for _ in 0..3 {
            gift.activate(&mut clock);
        }
        assert_eq!(clock.pending()[0].1, Duration::from_millis(250));
    }
}
