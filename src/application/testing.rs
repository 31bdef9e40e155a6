// SPDX-License-Identifier: MPL-2.0
//! In-memory port implementations.
//!
//! [`ScriptedElement`] records every command it receives and emits only the
//! events a test pushes into it. [`ManualClock`] hands out timer ids and
//! fires them on demand. Both are used by the unit tests, the integration
//! tests and the benchmarks.

use crate::application::port::{Clock, MediaElement, MediaEvent, MediaEventKind, SourceToken, TimerId};
use crate::error::MediaError;
use std::collections::VecDeque;
use std::time::Duration;

/// A command received by a [`ScriptedElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Stop,
    Unload,
}

#[derive(Debug, Default)]
pub struct ScriptedElement {
    calls: Vec<ElementCall>,
    events: VecDeque<MediaEvent>,
    token: Option<SourceToken>,
    load_failure: Option<MediaError>,
}

impl ScriptedElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[ElementCall] {
        &self.calls
    }

    /// Returns and forgets the recorded calls.
    pub fn take_calls(&mut self) -> Vec<ElementCall> {
        std::mem::take(&mut self.calls)
    }

    /// Sources passed to `load`, in order.
    #[must_use]
    pub fn loaded_sources(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ElementCall::Load(source) => Some(source.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Token of the most recent successful load.
    #[must_use]
    pub fn current_token(&self) -> Option<SourceToken> {
        self.token
    }

    /// Queues an event stamped with the current token.
    pub fn emit(&mut self, kind: MediaEventKind) {
        let token = self.token.unwrap_or_default();
        self.emit_with(token, kind);
    }

    /// Queues an event stamped with an explicit token.
    pub fn emit_with(&mut self, token: SourceToken, kind: MediaEventKind) {
        self.events.push_back(MediaEvent::new(token, kind));
    }

    /// Makes the next `load` fail synchronously.
    pub fn fail_next_load(&mut self, error: MediaError) {
        self.load_failure = Some(error);
    }
}

impl MediaElement for ScriptedElement {
    fn load(&mut self, source: &str, token: SourceToken) -> Result<(), MediaError> {
        self.calls.push(ElementCall::Load(source.to_string()));
        if let Some(error) = self.load_failure.take() {
            self.token = None;
            return Err(error);
        }
        self.token = Some(token);
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(ElementCall::Play);
    }

    fn pause(&mut self) {
        self.calls.push(ElementCall::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(ElementCall::Seek(seconds));
    }

    fn stop(&mut self) {
        self.calls.push(ElementCall::Stop);
    }

    fn unload(&mut self) {
        self.calls.push(ElementCall::Unload);
        self.token = None;
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}

/// A clock that only fires when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    pending: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and neither fired nor cancelled.
    #[must_use]
    pub fn pending(&self) -> &[(TimerId, Duration)] {
        &self.pending
    }

    #[must_use]
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Fires every pending timer, returning their ids in scheduling order.
    pub fn fire_all(&mut self) -> Vec<TimerId> {
        self.pending.drain(..).map(|(id, _)| id).collect()
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.pending.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        if self.pending.len() != before {
            self.cancelled.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_element_stamps_events_with_load_token() {
        let mut element = ScriptedElement::new();
        let token = SourceToken::new(4);
        element.load("a.mp3", token).expect("load succeeds");
        element.emit(MediaEventKind::Ready);

        let event = element.poll_event().expect("queued event");
        assert_eq!(event.token, token);
        assert_eq!(event.kind, MediaEventKind::Ready);
        assert!(element.poll_event().is_none());
    }

    #[test]
    fn scripted_element_fails_once() {
        let mut element = ScriptedElement::new();
        element.fail_next_load(MediaError::SourceNotFound("x".into()));
        assert!(element.load("x", SourceToken::new(1)).is_err());
        assert!(element.load("y", SourceToken::new(2)).is_ok());
        assert_eq!(element.loaded_sources(), vec!["x", "y"]);
    }

    #[test]
    fn manual_clock_cancel_removes_pending() {
        let mut clock = ManualClock::new();
        let first = clock.schedule(Duration::from_secs(3));
        let second = clock.schedule(Duration::from_secs(1));
        assert_ne!(first, second);

        clock.cancel(first);
        clock.cancel(first);
        assert_eq!(clock.cancelled(), &[first]);
        assert_eq!(clock.fire_all(), vec![second]);
        assert!(clock.pending().is_empty());
    }
}
