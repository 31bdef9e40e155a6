// SPDX-License-Identifier: MPL-2.0
//! Audio element port.
//!
//! The [`MediaElement`] trait is the seam between the playback controller and
//! whatever actually decodes and outputs sound. It mirrors a media element:
//! commands return immediately and outcomes (readiness, duration, position,
//! a settled play attempt, end of track, failure) arrive later as
//! [`MediaEvent`]s pulled through [`MediaElement::poll_event`].
//!
//! Every event carries the [`SourceToken`] passed to the `load` that produced
//! it, so the consumer can drop events from a source it has moved past.

use crate::error::MediaError;

/// Generation stamp of one `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SourceToken(u64);

impl SourceToken {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// The token following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What an element reports about its source.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Enough data is buffered to start playing.
    Ready,
    /// Track length in seconds.
    DurationKnown(f64),
    /// Playback position in seconds.
    TimeUpdate(f64),
    /// A `play()` request succeeded.
    PlayStarted,
    /// A `play()` request was refused.
    PlayRejected(String),
    /// The track played to its end.
    Ended,
    /// Loading or decoding failed; the source is unusable.
    Error(MediaError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub token: SourceToken,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    #[must_use]
    pub fn new(token: SourceToken, kind: MediaEventKind) -> Self {
        Self { token, kind }
    }
}

/// Port for the single audio channel.
///
/// Implementations must never block the caller: `play` only starts an
/// attempt whose outcome is reported as [`MediaEventKind::PlayStarted`] or
/// [`MediaEventKind::PlayRejected`].
pub trait MediaElement {
    /// Starts loading `source`, replacing whatever was loaded before.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] when the source cannot even be opened. Later
    /// failures are reported as [`MediaEventKind::Error`].
    fn load(&mut self, source: &str, token: SourceToken) -> Result<(), MediaError>;

    /// Requests playback.
    fn play(&mut self);

    fn pause(&mut self);

    /// Moves the playback position, in seconds.
    fn seek(&mut self, seconds: f64);

    /// Pauses and rewinds to the start, keeping the source loaded.
    fn stop(&mut self);

    /// Releases the current source.
    fn unload(&mut self);

    /// Returns the next pending event, if any.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}

impl<E: MediaElement + ?Sized> MediaElement for Box<E> {
    fn load(&mut self, source: &str, token: SourceToken) -> Result<(), MediaError> {
        (**self).load(source, token)
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek(&mut self, seconds: f64) {
        (**self).seek(seconds);
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn unload(&mut self) {
        (**self).unload();
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        (**self).poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait must stay object-safe for the boxed adapter.
    fn _assert_object_safe(_: &dyn MediaElement) {}

    #[test]
    fn tokens_advance_monotonically() {
        let first = SourceToken::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.value(), 1);
        assert_ne!(second.next(), second);
    }
}
