// SPDX-License-Identifier: MPL-2.0
//! The single audio channel.
//!
//! [`PlaybackController`] is the only writer of the process-wide
//! [`PlaybackState`]. It issues commands to a [`MediaElement`] and folds the
//! element's events back into the snapshot.
//!
//! Two guards keep late events from corrupting the state:
//!
//! - every `load` and `clear` moves to a new [`SourceToken`]; events stamped
//!   with an older token are dropped;
//! - a `PlayStarted` only counts while a play attempt is outstanding, so a
//!   pause issued before the attempt settles wins.

use crate::application::port::{MediaElement, MediaEvent, MediaEventKind, SourceToken};
use crate::domain::playback::PlaybackState;
use crate::error::MediaError;

/// Things worth surfacing to the user log after a [`PlaybackController::pump`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackNotice {
    TrackEnded { title: String },
    PlayRejected(String),
    PlaybackFailed(MediaError),
}

pub struct PlaybackController<E: MediaElement> {
    element: E,
    state: PlaybackState,
    token: SourceToken,
    autoplay: bool,
    /// Play as soon as the element reports readiness.
    autoplay_pending: bool,
    /// A `play()` was issued and has not settled yet.
    awaiting_play: bool,
    /// Last duration reported for the current source; survives `stop()`.
    known_duration: f64,
}

impl<E: MediaElement> PlaybackController<E> {
    #[must_use]
    pub fn new(element: E) -> Self {
        Self {
            element,
            state: PlaybackState::default(),
            token: SourceToken::default(),
            autoplay: true,
            autoplay_pending: false,
            awaiting_play: false,
            known_duration: 0.0,
        }
    }

    /// Whether a freshly loaded source starts by itself once ready.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn token(&self) -> SourceToken {
        self.token
    }

    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Replaces the current source. Whatever was playing is stopped first.
    pub fn load(&mut self, source: &str, title: &str) {
        if self.state.has_source() {
            self.stop();
        }

        self.token = self.token.next();
        self.awaiting_play = false;
        self.autoplay_pending = self.autoplay;
        self.known_duration = 0.0;
        self.state = PlaybackState {
            source: Some(source.to_string()),
            track_title: title.to_string(),
            ..PlaybackState::default()
        };

        tracing::debug!(source, title, token = self.token.value(), "loading track");

        if let Err(err) = self.element.load(source, self.token) {
            tracing::warn!(source, %err, "failed to load track");
            self.autoplay_pending = false;
        }
    }

    /// Toggles between playing and paused.
    pub fn play_pause(&mut self) {
        if !self.state.has_source() {
            return;
        }

        if self.state.is_playing || self.awaiting_play {
            self.element.pause();
            self.state.is_playing = false;
            self.awaiting_play = false;
            self.autoplay_pending = false;
        } else if self.state.is_loaded {
            self.request_play();
        } else {
            self.autoplay_pending = true;
        }
    }

    /// Moves the position. The value is passed through unclamped.
    pub fn seek(&mut self, seconds: f64) {
        if !self.state.has_source() {
            return;
        }
        self.element.seek(seconds);
        self.state.current_time = seconds;
    }

    /// Pauses and rewinds, keeping the source and title.
    pub fn stop(&mut self) {
        if !self.state.has_source() {
            return;
        }
        self.element.stop();
        self.state.is_playing = false;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.awaiting_play = false;
        self.autoplay_pending = false;
    }

    /// Unloads the element and forgets the source entirely.
    pub fn clear(&mut self) {
        self.element.unload();
        self.token = self.token.next();
        self.state = PlaybackState::default();
        self.awaiting_play = false;
        self.autoplay_pending = false;
        self.known_duration = 0.0;
    }

    /// Drains pending element events.
    pub fn pump(&mut self) -> Vec<PlaybackNotice> {
        let mut notices = Vec::new();
        while let Some(event) = self.element.poll_event() {
            if let Some(notice) = self.handle_event(event) {
                notices.push(notice);
            }
        }
        notices
    }

    /// Applies one element event.
    pub fn handle_event(&mut self, event: MediaEvent) -> Option<PlaybackNotice> {
        if event.token != self.token || !self.state.has_source() {
            tracing::trace!(
                token = event.token.value(),
                current = self.token.value(),
                "dropping stale media event"
            );
            return None;
        }

        match event.kind {
            MediaEventKind::Ready => {
                self.state.is_loaded = true;
                if self.autoplay_pending {
                    self.autoplay_pending = false;
                    self.request_play();
                }
                None
            }
            MediaEventKind::DurationKnown(duration) => {
                if duration.is_finite() && duration >= 0.0 {
                    self.known_duration = duration;
                    self.state.duration = duration;
                }
                None
            }
            MediaEventKind::TimeUpdate(seconds) => {
                if self.state.is_playing && seconds.is_finite() {
                    self.state.current_time = seconds.max(0.0);
                }
                None
            }
            MediaEventKind::PlayStarted => {
                if self.awaiting_play {
                    self.awaiting_play = false;
                    self.state.is_playing = true;
                    if self.state.duration == 0.0 {
                        self.state.duration = self.known_duration;
                    }
                }
                None
            }
            MediaEventKind::PlayRejected(reason) => {
                if !self.awaiting_play {
                    return None;
                }
                self.awaiting_play = false;
                self.state.is_playing = false;
                tracing::warn!(%reason, "audio play failed");
                Some(PlaybackNotice::PlayRejected(reason))
            }
            MediaEventKind::Ended => {
                self.state.is_playing = false;
                self.awaiting_play = false;
                self.state.current_time = 0.0;
                self.element.seek(0.0);
                Some(PlaybackNotice::TrackEnded {
                    title: self.state.track_title.clone(),
                })
            }
            MediaEventKind::Error(err) => {
                tracing::warn!(%err, "audio loading error");
                self.state.is_loaded = false;
                self.state.is_playing = false;
                self.awaiting_play = false;
                self.autoplay_pending = false;
                Some(PlaybackNotice::PlaybackFailed(err))
            }
        }
    }

    fn request_play(&mut self) {
        self.element.play();
        self.awaiting_play = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{ElementCall, ScriptedElement};
    use crate::test_utils::assert_abs_diff_eq;

    fn controller() -> PlaybackController<ScriptedElement> {
        PlaybackController::new(ScriptedElement::new())
    }

    /// Loads a source and drives it to the playing state.
    fn playing(source: &str) -> PlaybackController<ScriptedElement> {
        let mut ctrl = controller();
        ctrl.load(source, "Track");
        ctrl.element_mut().emit(MediaEventKind::DurationKnown(120.0));
        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.pump();
        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();
        ctrl.element_mut().take_calls();
        ctrl
    }

    #[test]
    fn load_sets_source_and_title_but_not_playing() {
        let mut ctrl = controller();
        ctrl.load("a.mp3", "A");

        let state = ctrl.state();
        assert_eq!(state.source.as_deref(), Some("a.mp3"));
        assert_eq!(state.track_title, "A");
        assert!(!state.is_playing);
        assert!(!state.is_loaded);
        assert_eq!(ctrl.element().loaded_sources(), vec!["a.mp3"]);
    }

    #[test]
    fn ready_triggers_autoplay_and_play_started_sets_playing() {
        let mut ctrl = controller();
        ctrl.load("a.mp3", "A");
        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.pump();

        assert!(ctrl.state().is_loaded);
        assert!(!ctrl.state().is_playing);
        assert!(ctrl.element().calls().contains(&ElementCall::Play));

        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();
        assert!(ctrl.state().is_playing);
    }

    #[test]
    fn autoplay_disabled_waits_for_user() {
        let mut ctrl = PlaybackController::new(ScriptedElement::new()).with_autoplay(false);
        ctrl.load("a.mp3", "A");
        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.pump();
        assert!(!ctrl.element().calls().contains(&ElementCall::Play));

        ctrl.play_pause();
        assert!(ctrl.element().calls().contains(&ElementCall::Play));
    }

    #[test]
    fn rejected_play_leaves_not_playing() {
        let mut ctrl = controller();
        ctrl.load("a.mp3", "A");
        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.element_mut()
            .emit(MediaEventKind::PlayRejected("autoplay blocked".into()));
        let notices = ctrl.pump();

        assert!(!ctrl.state().is_playing);
        assert_eq!(
            notices,
            vec![PlaybackNotice::PlayRejected("autoplay blocked".into())]
        );
    }

    #[test]
    fn loading_second_track_stops_first() {
        let mut ctrl = playing("a.mp3");
        ctrl.load("b.mp3", "B");

        let calls = ctrl.element().calls();
        assert_eq!(calls[0], ElementCall::Stop);
        assert_eq!(calls[1], ElementCall::Load("b.mp3".into()));
        assert_eq!(ctrl.state().source.as_deref(), Some("b.mp3"));
        assert!(!ctrl.state().is_playing);
    }

    #[test]
    fn stale_events_from_previous_source_are_dropped() {
        let mut ctrl = controller();
        ctrl.load("a.mp3", "A");
        let stale = ctrl.token();
        ctrl.load("b.mp3", "B");

        ctrl.element_mut()
            .emit_with(stale, MediaEventKind::DurationKnown(99.0));
        ctrl.element_mut().emit_with(stale, MediaEventKind::Ready);
        ctrl.element_mut().emit_with(stale, MediaEventKind::PlayStarted);
        ctrl.pump();

        assert!(!ctrl.state().is_loaded);
        assert!(!ctrl.state().is_playing);
        assert_abs_diff_eq!(ctrl.state().duration, 0.0);
    }

    #[test]
    fn pause_before_play_settles_wins() {
        let mut ctrl = controller();
        ctrl.load("a.mp3", "A");
        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.pump();

        ctrl.play_pause();
        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();

        assert!(!ctrl.state().is_playing);
        assert!(ctrl.element().calls().contains(&ElementCall::Pause));
    }

    #[test]
    fn play_pause_toggles() {
        let mut ctrl = playing("a.mp3");

        ctrl.play_pause();
        assert!(!ctrl.state().is_playing);
        assert_eq!(ctrl.element().calls(), &[ElementCall::Pause]);

        ctrl.play_pause();
        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();
        assert!(ctrl.state().is_playing);
    }

    #[test]
    fn play_pause_without_source_is_noop() {
        let mut ctrl = controller();
        ctrl.play_pause();
        assert!(ctrl.element().calls().is_empty());
        assert!(!ctrl.state().is_playing);
    }

    #[test]
    fn play_pause_before_ready_rearms_autoplay() {
        let mut ctrl = PlaybackController::new(ScriptedElement::new()).with_autoplay(false);
        ctrl.load("a.mp3", "A");
        ctrl.play_pause();
        assert!(!ctrl.element().calls().contains(&ElementCall::Play));

        ctrl.element_mut().emit(MediaEventKind::Ready);
        ctrl.pump();
        assert!(ctrl.element().calls().contains(&ElementCall::Play));
    }

    #[test]
    fn time_updates_apply_only_while_playing() {
        let mut ctrl = playing("a.mp3");
        ctrl.element_mut().emit(MediaEventKind::TimeUpdate(12.5));
        ctrl.pump();
        assert_abs_diff_eq!(ctrl.state().current_time, 12.5);

        ctrl.play_pause();
        ctrl.element_mut().emit(MediaEventKind::TimeUpdate(13.0));
        ctrl.pump();
        assert_abs_diff_eq!(ctrl.state().current_time, 12.5);
    }

    #[test]
    fn seek_is_optimistic_and_unclamped() {
        let mut ctrl = playing("a.mp3");
        ctrl.seek(500.0);
        assert_abs_diff_eq!(ctrl.state().current_time, 500.0);
        assert_eq!(ctrl.element().calls(), &[ElementCall::Seek(500.0)]);
    }

    #[test]
    fn stop_keeps_source_and_zeroes_times() {
        let mut ctrl = playing("a.mp3");
        ctrl.seek(30.0);
        ctrl.stop();

        let state = ctrl.state();
        assert_eq!(state.source.as_deref(), Some("a.mp3"));
        assert_eq!(state.track_title, "Track");
        assert!(!state.is_playing);
        assert_abs_diff_eq!(state.current_time, 0.0);
        assert_abs_diff_eq!(state.duration, 0.0);
    }

    #[test]
    fn replay_after_stop_restores_duration() {
        let mut ctrl = playing("a.mp3");
        ctrl.stop();
        ctrl.play_pause();
        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();
        assert!(ctrl.state().is_playing);
        assert_abs_diff_eq!(ctrl.state().duration, 120.0);
    }

    #[test]
    fn ended_rewinds_and_keeps_duration() {
        let mut ctrl = playing("a.mp3");
        ctrl.element_mut().emit(MediaEventKind::TimeUpdate(119.0));
        ctrl.element_mut().emit(MediaEventKind::Ended);
        let notices = ctrl.pump();

        assert!(!ctrl.state().is_playing);
        assert_abs_diff_eq!(ctrl.state().current_time, 0.0);
        assert_abs_diff_eq!(ctrl.state().duration, 120.0);
        assert!(ctrl.element().calls().contains(&ElementCall::Seek(0.0)));
        assert_eq!(
            notices,
            vec![PlaybackNotice::TrackEnded {
                title: "Track".into()
            }]
        );
    }

    #[test]
    fn error_marks_not_loaded_without_retry() {
        let mut ctrl = playing("a.mp3");
        ctrl.element_mut()
            .emit(MediaEventKind::Error(MediaError::DecodingFailed("bad".into())));
        ctrl.pump();

        assert!(!ctrl.state().is_loaded);
        assert!(!ctrl.state().is_playing);
        assert!(ctrl.element().loaded_sources().is_empty());
    }

    #[test]
    fn synchronous_load_failure_leaves_idle() {
        let mut ctrl = controller();
        ctrl.element_mut()
            .fail_next_load(MediaError::SourceNotFound("missing.mp3".into()));
        ctrl.load("missing.mp3", "Missing");

        assert!(!ctrl.state().is_playing);
        assert!(!ctrl.state().is_loaded);
    }

    #[test]
    fn clear_resets_everything_and_ignores_late_events() {
        let mut ctrl = playing("a.mp3");
        let old = ctrl.token();
        ctrl.clear();

        assert_eq!(*ctrl.state(), PlaybackState::default());
        assert!(ctrl.element().calls().contains(&ElementCall::Unload));

        ctrl.element_mut().emit_with(old, MediaEventKind::PlayStarted);
        ctrl.pump();
        assert!(!ctrl.state().is_playing);
    }

    #[test]
    fn playing_always_has_source() {
        let mut ctrl = playing("a.mp3");
        ctrl.clear();
        ctrl.element_mut().emit(MediaEventKind::PlayStarted);
        ctrl.pump();
        assert!(!ctrl.state().is_playing || ctrl.state().source.is_some());
    }
}
