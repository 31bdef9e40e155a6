// SPDX-License-Identifier: MPL-2.0
//! Top-level view routing.
//!
//! [`NavigationCoordinator`] owns every piece of core state: the catalog, the
//! [`NavigationState`], the gallery carousel, the gift's unwrap sequence and
//! the playback controller. Views read snapshots and mutate only through the
//! commands below.
//!
//! ```text
//! Welcome ──touch──▶ Gallery ──activate(normal)──▶ PhotoStackOverlay
//!                      ▲  │                              │
//!                      │  └──activate(video)──▶ VideoOverlay
//!                      └────────exit_overlay◀────────────┘
//! ```

use crate::application::gallery::{GalleryCarousel, SwipeOutcome};
use crate::application::playback::{PlaybackController, PlaybackNotice};
use crate::application::port::{Clock, MediaElement, TimerId};
use crate::application::unwrap::{RevealComplete, UnwrapSequence, UnwrapStep};
use crate::domain::catalog::{Catalog, CatalogEntry, EntryKind};
use crate::domain::navigation::{ActiveView, NavigationState};
use crate::domain::playback::PlaybackState;
use crate::domain::unwrap::UnwrapState;
use crate::error::NavigationError;
use std::time::Duration;

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The entry's track was loaded and the photo stack is showing.
    PhotoStackOpened,
    /// The video overlay is showing.
    VideoOpened,
    /// The gift moved one stage forward.
    GiftStep(UnwrapStep),
    /// The gift was already fully open.
    GiftUnchanged,
}

pub struct NavigationCoordinator<E: MediaElement> {
    catalog: Catalog,
    state: NavigationState,
    carousel: GalleryCarousel,
    unwrap: UnwrapSequence,
    playback: PlaybackController<E>,
    /// Entry that opened the visible overlay.
    overlay_origin: Option<usize>,
}

impl<E: MediaElement> NavigationCoordinator<E> {
    #[must_use]
    pub fn new(catalog: Catalog, playback: PlaybackController<E>) -> Self {
        let carousel = GalleryCarousel::new(catalog.len());
        Self {
            catalog,
            state: NavigationState::default(),
            carousel,
            unwrap: UnwrapSequence::new(),
            playback,
            overlay_origin: None,
        }
    }

    #[must_use]
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.carousel = self.carousel.with_threshold(threshold);
        self
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.unwrap = self.unwrap.with_reveal_delay(delay);
        self
    }

    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn carousel(&self) -> &GalleryCarousel {
        &self.carousel
    }

    #[must_use]
    pub fn unwrap_state(&self) -> UnwrapState {
        self.unwrap.state()
    }

    #[must_use]
    pub fn playback_state(&self) -> &PlaybackState {
        self.playback.state()
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackController<E> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.playback
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.catalog.get(self.state.selected_index)
    }

    /// Leaves the welcome screen.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] from any other view.
    pub fn touch(&mut self) -> Result<(), NavigationError> {
        self.require(ActiveView::Welcome, "touch")?;
        self.state.active_view = ActiveView::Gallery;
        tracing::debug!("welcome dismissed");
        Ok(())
    }

    /// Activates the entry at `index`, making it the selection.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] outside the gallery and
    /// [`NavigationError::IndexOutOfRange`] for an unknown index. Neither
    /// changes any state.
    pub fn activate<C: Clock + ?Sized>(
        &mut self,
        index: usize,
        clock: &mut C,
    ) -> Result<ActivationOutcome, NavigationError> {
        self.require(ActiveView::Gallery, "activate")?;
        let entry = self
            .catalog
            .get(index)
            .cloned()
            .ok_or(NavigationError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            })?;

        self.move_selection(index, clock)?;

        let outcome = match entry.kind {
            EntryKind::SpecialVideo => {
                self.open_overlay(ActiveView::VideoOverlay, index);
                ActivationOutcome::VideoOpened
            }
            EntryKind::Gift => match self.unwrap.activate(clock) {
                Some(step) => {
                    if step.start_special_audio {
                        self.load_entry_audio(&entry);
                    }
                    ActivationOutcome::GiftStep(step)
                }
                None => ActivationOutcome::GiftUnchanged,
            },
            EntryKind::Normal => {
                self.load_entry_audio(&entry);
                self.open_overlay(ActiveView::PhotoStackOverlay, index);
                ActivationOutcome::PhotoStackOpened
            }
        };

        tracing::debug!(index, title = %entry.title, ?outcome, "entry activated");
        Ok(outcome)
    }

    /// Activates the currently selected entry.
    ///
    /// # Errors
    ///
    /// See [`Self::activate`].
    pub fn activate_selected<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
    ) -> Result<ActivationOutcome, NavigationError> {
        self.activate(self.state.selected_index, clock)
    }

    /// Returns from an overlay to the gallery. Playback keeps going.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] when no overlay is visible.
    pub fn exit_overlay(&mut self) -> Result<(), NavigationError> {
        if !self.state.active_view.is_overlay() {
            return Err(NavigationError::InvalidTransition {
                from: self.state.active_view,
                command: "exit_overlay",
            });
        }

        if let Some(origin) = self.overlay_origin.take() {
            self.carousel.select(origin)?;
            self.state.selected_index = origin;
        }
        self.state.active_view = ActiveView::Gallery;
        tracing::debug!(index = self.state.selected_index, "overlay closed");
        Ok(())
    }

    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] outside the gallery.
    pub fn swipe_begin(&mut self, x: f32) -> Result<(), NavigationError> {
        self.require(ActiveView::Gallery, "swipe")?;
        self.carousel.swipe_begin(x);
        Ok(())
    }

    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] outside the gallery.
    pub fn swipe_end<C: Clock + ?Sized>(
        &mut self,
        x: f32,
        clock: &mut C,
    ) -> Result<SwipeOutcome, NavigationError> {
        self.require(ActiveView::Gallery, "swipe")?;
        let previous = self.carousel.index();
        let outcome = self.carousel.swipe_end(x);
        self.sync_selection(previous, clock);
        Ok(outcome)
    }

    /// Forgets a swipe in progress. Valid from any view.
    pub fn cancel_swipe(&mut self) {
        self.carousel.cancel_swipe();
    }

    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] outside the gallery.
    pub fn wheel<C: Clock + ?Sized>(
        &mut self,
        dx: f32,
        clock: &mut C,
    ) -> Result<bool, NavigationError> {
        self.require(ActiveView::Gallery, "wheel")?;
        let previous = self.carousel.index();
        let changed = self.carousel.wheel(dx);
        self.sync_selection(previous, clock);
        Ok(changed)
    }

    /// # Errors
    ///
    /// [`NavigationError::InvalidTransition`] outside the gallery and
    /// [`NavigationError::IndexOutOfRange`] for an unknown dot.
    pub fn select_dot<C: Clock + ?Sized>(
        &mut self,
        index: usize,
        clock: &mut C,
    ) -> Result<(), NavigationError> {
        self.require(ActiveView::Gallery, "select_dot")?;
        self.move_selection(index, clock)
    }

    /// Routes a clock firing to the unwrap sequence.
    pub fn on_timer(&mut self, id: TimerId) -> Option<RevealComplete> {
        self.unwrap.on_timer(id)
    }

    pub fn play_pause(&mut self) {
        self.playback.play_pause();
    }

    pub fn seek(&mut self, seconds: f64) {
        self.playback.seek(seconds);
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    pub fn pump_media(&mut self) -> Vec<PlaybackNotice> {
        self.playback.pump()
    }

    fn require(&self, view: ActiveView, command: &'static str) -> Result<(), NavigationError> {
        if self.state.active_view == view {
            Ok(())
        } else {
            Err(NavigationError::InvalidTransition {
                from: self.state.active_view,
                command,
            })
        }
    }

    fn move_selection<C: Clock + ?Sized>(
        &mut self,
        index: usize,
        clock: &mut C,
    ) -> Result<(), NavigationError> {
        let previous = self.carousel.index();
        self.carousel.select(index)?;
        self.sync_selection(previous, clock);
        Ok(())
    }

    /// Copies the carousel index into the state and runs the gift edge
    /// detector: arriving on a gift from another entry re-closes it.
    fn sync_selection<C: Clock + ?Sized>(&mut self, previous: usize, clock: &mut C) {
        let current = self.carousel.index();
        self.state.selected_index = current;

        let arrived_on_gift =
            current != previous && self.catalog.get(current).is_some_and(CatalogEntry::is_gift);
        if arrived_on_gift {
            self.unwrap.reset(clock);
            tracing::debug!(
                reset_token = self.unwrap.state().reset_token,
                "gift re-entered, closing it again"
            );
        }
    }

    fn open_overlay(&mut self, view: ActiveView, origin: usize) {
        self.overlay_origin = Some(origin);
        self.state.active_view = view;
    }

    fn load_entry_audio(&mut self, entry: &CatalogEntry) {
        match &entry.audio {
            Some(audio) => self.playback.load(audio, &entry.title),
            None => tracing::warn!(title = %entry.title, "entry has no audio to play"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::application::port::MediaEventKind;
    use crate::application::testing::{ManualClock, ScriptedElement};
    use crate::domain::catalog::Photo;
    use crate::domain::unwrap::UnwrapStage;

    /// `[A(normal), B(special video), C(gift)]`
    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogEntry::normal("a.jpg", "a.mp3", "A"),
                CatalogEntry::special_video("b.jpg", "B"),
                CatalogEntry::gift("c.png", "c.mp3", "C"),
            ],
            Some("b.mp4".into()),
            vec![Photo::new("p.jpg", "2020-01-01", "Here")],
        )
        .expect("valid catalog")
    }

    fn in_gallery() -> (NavigationCoordinator<ScriptedElement>, ManualClock) {
        let mut nav =
            NavigationCoordinator::new(catalog(), PlaybackController::new(ScriptedElement::new()));
        nav.touch().expect("welcome → gallery");
        (nav, ManualClock::new())
    }

    fn start_playing(nav: &mut NavigationCoordinator<ScriptedElement>) {
        nav.playback_mut()
            .element_mut()
            .emit(MediaEventKind::Ready);
        nav.pump_media();
        nav.playback_mut()
            .element_mut()
            .emit(MediaEventKind::PlayStarted);
        nav.pump_media();
    }

    #[test]
    fn starts_on_welcome_and_touch_enters_gallery() {
        let mut nav =
            NavigationCoordinator::new(catalog(), PlaybackController::new(ScriptedElement::new()));
        assert_eq!(nav.state().active_view, ActiveView::Welcome);
        nav.touch().expect("touch");
        assert_eq!(nav.state().active_view, ActiveView::Gallery);
    }

    #[test]
    fn welcome_is_never_reentered() {
        let (mut nav, _) = in_gallery();
        assert_eq!(
            nav.touch(),
            Err(NavigationError::InvalidTransition {
                from: ActiveView::Gallery,
                command: "touch",
            })
        );
    }

    #[test]
    fn normal_activation_plays_and_exit_keeps_playing() {
        let (mut nav, mut clock) = in_gallery();

        let outcome = nav.activate(0, &mut clock).expect("activate A");
        assert_eq!(outcome, ActivationOutcome::PhotoStackOpened);
        assert_eq!(nav.state().active_view, ActiveView::PhotoStackOverlay);
        assert_eq!(nav.playback_state().source.as_deref(), Some("a.mp3"));

        start_playing(&mut nav);
        nav.exit_overlay().expect("exit");

        assert_eq!(nav.state().active_view, ActiveView::Gallery);
        assert_eq!(nav.state().selected_index, 0);
        assert!(nav.playback_state().is_playing);
        assert_eq!(nav.playback_state().source.as_deref(), Some("a.mp3"));
    }

    #[test]
    fn video_activation_leaves_playback_alone() {
        let (mut nav, mut clock) = in_gallery();
        nav.activate(0, &mut clock).expect("activate A");
        nav.exit_overlay().expect("exit");

        let outcome = nav.activate(1, &mut clock).expect("activate B");
        assert_eq!(outcome, ActivationOutcome::VideoOpened);
        assert_eq!(nav.state().active_view, ActiveView::VideoOverlay);
        assert_eq!(nav.state().selected_index, 1);
        assert_eq!(nav.playback_state().source.as_deref(), Some("a.mp3"));

        nav.exit_overlay().expect("exit");
        assert_eq!(nav.state().selected_index, 1);
    }

    #[test]
    fn gift_first_step_loads_companion_audio_once() {
        let (mut nav, mut clock) = in_gallery();

        let first = nav.activate(2, &mut clock).expect("gift");
        assert!(matches!(
            first,
            ActivationOutcome::GiftStep(UnwrapStep {
                stage: UnwrapStage::BowUndone,
                start_special_audio: true,
            })
        ));
        assert_eq!(nav.state().active_view, ActiveView::Gallery);
        assert_eq!(nav.playback().element().loaded_sources(), vec!["c.mp3"]);

        nav.activate(2, &mut clock).expect("gift");
        assert_eq!(nav.unwrap_state().stage, UnwrapStage::LidOpen);
        assert_eq!(nav.playback().element().loaded_sources(), vec!["c.mp3"]);
    }

    #[test]
    fn gift_audio_replaces_current_track() {
        let (mut nav, mut clock) = in_gallery();
        nav.activate(0, &mut clock).expect("activate A");
        start_playing(&mut nav);
        nav.exit_overlay().expect("exit");

        nav.activate(2, &mut clock).expect("gift");
        assert_eq!(nav.playback_state().source.as_deref(), Some("c.mp3"));
        assert!(!nav.playback_state().is_playing);
    }

    #[test]
    fn leaving_and_returning_to_gift_recloses_it() {
        let (mut nav, mut clock) = in_gallery();
        for _ in 0..3 {
            nav.activate(2, &mut clock).expect("gift");
        }
        assert_eq!(nav.unwrap_state().stage, UnwrapStage::TicketRevealed);
        let token = nav.unwrap_state().reset_token;

        nav.select_dot(1, &mut clock).expect("away");
        nav.select_dot(2, &mut clock).expect("back");

        assert_eq!(nav.unwrap_state().stage, UnwrapStage::Closed);
        assert!(nav.unwrap_state().reset_token > token);
        assert_eq!(clock.cancelled().len(), 1);
    }

    #[test]
    fn staying_on_gift_does_not_reset() {
        let (mut nav, mut clock) = in_gallery();
        nav.select_dot(2, &mut clock).expect("onto gift");
        nav.activate(2, &mut clock).expect("gift");
        let token = nav.unwrap_state().reset_token;

        nav.select_dot(2, &mut clock).expect("same dot");
        assert!(!nav.wheel(1.0, &mut clock).expect("wheel at edge"));
        assert_eq!(nav.unwrap_state().stage, UnwrapStage::BowUndone);
        assert_eq!(nav.unwrap_state().reset_token, token);
    }

    #[test]
    fn swiping_onto_gift_resets_it() {
        let (mut nav, mut clock) = in_gallery();
        nav.select_dot(2, &mut clock).expect("gift");
        nav.activate(2, &mut clock).expect("gift");

        nav.swipe_begin(100.0).expect("begin");
        assert_eq!(
            nav.swipe_end(300.0, &mut clock).expect("end"),
            SwipeOutcome::Moved(1)
        );
        nav.swipe_begin(300.0).expect("begin");
        nav.swipe_end(100.0, &mut clock).expect("end");

        assert_eq!(nav.state().selected_index, 2);
        assert_eq!(nav.unwrap_state().stage, UnwrapStage::Closed);
    }

    #[test]
    fn reveal_completes_through_on_timer() {
        let (mut nav, mut clock) = in_gallery();
        for _ in 0..3 {
            nav.activate(2, &mut clock).expect("gift");
        }
        assert_eq!(
            nav.activate(2, &mut clock).expect("gift"),
            ActivationOutcome::GiftUnchanged
        );

        let fired = clock.fire_all();
        assert_eq!(fired.len(), 1);
        assert!(nav.on_timer(fired[0]).is_some());
        assert!(nav.on_timer(fired[0]).is_none());
        assert_eq!(nav.state().active_view, ActiveView::Gallery);
    }

    #[test]
    fn out_of_range_activation_fails_without_side_effects() {
        let (mut nav, mut clock) = in_gallery();
        let before = nav.state();

        assert_eq!(
            nav.activate(7, &mut clock),
            Err(NavigationError::IndexOutOfRange { index: 7, len: 3 })
        );
        assert_eq!(nav.state(), before);
        assert!(nav.playback().element().calls().is_empty());
    }

    #[test]
    fn activation_outside_gallery_is_rejected() {
        let mut nav =
            NavigationCoordinator::new(catalog(), PlaybackController::new(ScriptedElement::new()));
        let mut clock = ManualClock::new();
        assert!(matches!(
            nav.activate(0, &mut clock),
            Err(NavigationError::InvalidTransition { .. })
        ));

        nav.touch().expect("touch");
        nav.activate(0, &mut clock).expect("activate");
        assert!(matches!(
            nav.activate(0, &mut clock),
            Err(NavigationError::InvalidTransition {
                from: ActiveView::PhotoStackOverlay,
                ..
            })
        ));
    }

    #[test]
    fn carousel_input_ignored_in_overlays() {
        let (mut nav, mut clock) = in_gallery();
        nav.activate(0, &mut clock).expect("activate");

        assert!(nav.swipe_begin(0.0).is_err());
        assert!(nav.wheel(1.0, &mut clock).is_err());
        assert!(nav.select_dot(2, &mut clock).is_err());
        assert_eq!(nav.state().selected_index, 0);
    }

    #[test]
    fn exit_overlay_from_gallery_is_rejected() {
        let (mut nav, _) = in_gallery();
        assert!(matches!(
            nav.exit_overlay(),
            Err(NavigationError::InvalidTransition {
                command: "exit_overlay",
                ..
            })
        ));
    }

    #[test]
    fn activate_selected_follows_the_carousel() {
        let (mut nav, mut clock) = in_gallery();
        nav.wheel(1.0, &mut clock).expect("wheel");
        assert_eq!(
            nav.activate_selected(&mut clock),
            Ok(ActivationOutcome::VideoOpened)
        );
    }

    #[test]
    fn playback_passthroughs_reach_the_controller() {
        let (mut nav, mut clock) = in_gallery();
        nav.activate(0, &mut clock).expect("activate");
        start_playing(&mut nav);

        nav.seek(42.0);
        assert_abs_diff_eq!(nav.playback_state().current_time, 42.0);
        nav.play_pause();
        assert!(!nav.playback_state().is_playing);
        nav.stop();
        assert_abs_diff_eq!(nav.playback_state().current_time, 0.0);
    }
}
