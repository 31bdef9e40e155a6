// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Pointer and touch input is observed globally so a swipe released outside
//! the slide still ends. Presses, moves and releases all travel through this
//! one subscription so the gesture sees them in the order they happened. Media and video are polled on timers because the
//! decoder threads only fill channels.

use super::Message;
use crate::config::{MEDIA_POLL_INTERVAL_MS, VIDEO_FRAME_INTERVAL_MS};
use iced::{event, mouse, time, touch, Event, Subscription};
use std::time::Duration;

/// Pixels per wheel "line" when the platform reports line deltas.
const PIXELS_PER_LINE: f32 = 40.0;

/// Routes pointer, touch and wheel events.
pub fn create_pointer_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window| match event {
        Event::Mouse(mouse::Event::CursorMoved { position })
        | Event::Touch(touch::Event::FingerMoved { position, .. }) => {
            Some(Message::PointerMoved(position))
        }
        Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            Some(Message::PointerPressed(Some(position)))
        }
        // Mouse buttons carry no position; the last cursor move on this same
        // stream is already applied when they arrive.
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::PointerPressed(None))
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::PointerReleased(None))
        }
        Event::Touch(
            touch::Event::FingerLifted { position, .. } | touch::Event::FingerLost { position, .. },
        ) => Some(Message::PointerReleased(Some(position))),
        Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerLeft),
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => match status {
            event::Status::Ignored => horizontal_pixels(delta).map(Message::Wheel),
            event::Status::Captured => None,
        },
        _ => None,
    })
}

/// Forward-positive horizontal travel of a wheel event. Vertical scrolling
/// does not page the gallery.
fn horizontal_pixels(delta: mouse::ScrollDelta) -> Option<f32> {
    let x = match delta {
        mouse::ScrollDelta::Lines { x, .. } => x * PIXELS_PER_LINE,
        mouse::ScrollDelta::Pixels { x, .. } => x,
    };
    // Positive deltas move content right, i.e. toward the previous slide.
    (x != 0.0).then_some(-x)
}

/// Drains audio element events.
pub fn create_media_subscription() -> Subscription<Message> {
    time::every(Duration::from_millis(MEDIA_POLL_INTERVAL_MS)).map(|_| Message::MediaTick)
}

/// Pulls decoded frames while a video is running.
pub fn create_video_subscription(video_running: bool) -> Subscription<Message> {
    if video_running {
        time::every(Duration::from_millis(VIDEO_FRAME_INTERVAL_MS)).map(|_| Message::VideoTick)
    } else {
        Subscription::none()
    }
}
