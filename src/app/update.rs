// SPDX-License-Identifier: MPL-2.0
//! Message routing for [`App`].
//!
//! Each handler translates one front-end message into coordinator commands.
//! Rejected commands (a swipe while an overlay is up, a second touch) are
//! expected in normal use and only logged at debug level.

use super::{App, Message};
use crate::application::playback::PlaybackNotice;
use crate::application::port::{MediaElement, TimerId};
use crate::application::{ActivationOutcome, PhotoStack, SwipeOutcome};
use crate::error::NavigationError;
use crate::infrastructure::{VideoFrame, VideoLoop};
use crate::ui::{gallery, music_player, photo_stack, video_overlay, welcome};
use iced::widget::image;
use iced::Point;

impl<E: MediaElement> App<E> {
    pub(super) fn handle(&mut self, message: Message) {
        match message {
            Message::Welcome(welcome::Message::Touched) => {
                let result = self.coordinator.touch();
                log_rejection(result);
            }
            Message::Gallery(msg) => self.handle_gallery(msg),
            Message::PhotoStack(msg) => self.handle_photo_stack(msg),
            Message::Video(video_overlay::Message::Exit) => self.exit_overlay(),
            Message::Player(msg) => self.handle_player(msg),
            Message::PointerMoved(position) => self.pointer = position,
            Message::PointerPressed(position) => self.handle_press(position),
            Message::PointerReleased(position) => self.handle_release(position),
            Message::PointerLeft => {
                self.slide_hovered = false;
                self.coordinator.cancel_swipe();
            }
            Message::Wheel(dx) => {
                let result = self.coordinator.wheel(dx, &mut self.clock);
                log_rejection(result);
            }
            Message::MediaTick => self.pump_media(),
            Message::VideoTick => self.pull_video_frame(),
            Message::TimerFired(id) => self.handle_timer(id),
        }
    }

    fn handle_gallery(&mut self, message: gallery::Message) {
        match message {
            gallery::Message::SlideEntered => self.slide_hovered = true,
            gallery::Message::SlideExited => self.slide_hovered = false,
            gallery::Message::DotSelected(index) => {
                let result = self.coordinator.select_dot(index, &mut self.clock);
                log_rejection(result);
            }
        }
    }

    fn handle_press(&mut self, position: Option<Point>) {
        if let Some(position) = position {
            self.pointer = position;
        }
        if !self.slide_hovered {
            return;
        }
        let result = self.coordinator.swipe_begin(self.pointer.x);
        log_rejection(result);
    }

    fn handle_release(&mut self, position: Option<Point>) {
        if let Some(position) = position {
            self.pointer = position;
        }
        match self.coordinator.swipe_end(self.pointer.x, &mut self.clock) {
            Ok(SwipeOutcome::Tap) => self.activate_selected(),
            Ok(SwipeOutcome::Moved(index)) => tracing::trace!(index, "swiped"),
            Ok(SwipeOutcome::AtEdge | SwipeOutcome::Ignored) => {}
            // Releases arrive from every view; only the gallery swipes.
            Err(_) => {}
        }
    }

    fn activate_selected(&mut self) {
        match self.coordinator.activate_selected(&mut self.clock) {
            Ok(ActivationOutcome::PhotoStackOpened) => {
                self.photo_stack =
                    PhotoStack::new(self.coordinator.catalog().photos(), &mut self.rng);
            }
            Ok(ActivationOutcome::VideoOpened) => self.start_video(),
            Ok(ActivationOutcome::GiftStep(step)) => {
                tracing::debug!(stage = ?step.stage, "gift stage advanced");
            }
            Ok(ActivationOutcome::GiftUnchanged) => {}
            Err(err) => tracing::debug!("ignored input: {err}"),
        }
    }

    fn handle_photo_stack(&mut self, message: photo_stack::Message) {
        match message {
            photo_stack::Message::Advance => self.photo_stack.advance(&mut self.rng),
            photo_stack::Message::Exit => self.exit_overlay(),
        }
    }

    fn handle_player(&mut self, message: music_player::Message) {
        match message {
            music_player::Message::TogglePlayback => self.coordinator.play_pause(),
            music_player::Message::SeekPreview(seconds) => self.seek_preview = Some(seconds),
            music_player::Message::SeekCommit => {
                if let Some(seconds) = self.seek_preview.take() {
                    self.coordinator.seek(seconds);
                }
            }
        }
    }

    fn exit_overlay(&mut self) {
        let result = self.coordinator.exit_overlay();
        log_rejection(result);
        self.stop_video();
    }

    fn start_video(&mut self) {
        self.stop_video();
        let Some(video) = self.coordinator.catalog().video() else {
            self.video_failed = true;
            return;
        };

        match VideoLoop::start(self.assets_dir.join(video)) {
            Ok(video) => self.video = Some(video),
            Err(err) => {
                tracing::warn!("cannot play video: {err}");
                self.video_failed = true;
            }
        }
    }

    fn stop_video(&mut self) {
        self.video = None;
        self.video_frame = None;
        self.video_failed = false;
    }

    fn pull_video_frame(&mut self) {
        let Some(video) = self.video.as_mut() else {
            return;
        };

        let (frame, failure) = video.latest();
        if let Some(VideoFrame {
            width,
            height,
            rgba,
        }) = frame
        {
            self.video_frame = Some(image::Handle::from_rgba(width, height, (*rgba).clone()));
        }
        if failure.is_some() {
            self.video = None;
            self.video_failed = true;
        }
    }

    fn pump_media(&mut self) {
        for notice in self.coordinator.pump_media() {
            match notice {
                PlaybackNotice::TrackEnded { title } => tracing::info!(%title, "track ended"),
                PlaybackNotice::PlayRejected(reason) => {
                    tracing::warn!(%reason, "playback was refused");
                }
                PlaybackNotice::PlaybackFailed(err) => tracing::warn!("playback failed: {err}"),
            }
        }
    }

    fn handle_timer(&mut self, id: TimerId) {
        if !self.clock.fire(id) {
            return;
        }
        if let Some(done) = self.coordinator.on_timer(id) {
            tracing::info!(reset_token = done.reset_token, "gift reveal complete");
        }
    }
}

fn log_rejection<T>(result: Result<T, NavigationError>) {
    if let Err(err) = result {
        tracing::debug!("ignored input: {err}");
    }
}
