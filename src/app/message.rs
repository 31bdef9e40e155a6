// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::TimerId;
use crate::ui::{gallery, music_player, photo_stack, video_overlay, welcome};
use iced::Point;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level view messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Welcome(welcome::Message),
    Gallery(gallery::Message),
    PhotoStack(photo_stack::Message),
    Video(video_overlay::Message),
    Player(music_player::Message),
    /// Pointer position anywhere in the window.
    PointerMoved(Point),
    /// Primary button or finger went down anywhere in the window. Touch
    /// carries the contact point; a mouse press uses the last cursor move.
    PointerPressed(Option<Point>),
    /// Primary button or finger released anywhere in the window.
    PointerReleased(Option<Point>),
    /// The pointer left the window.
    PointerLeft,
    /// Horizontal wheel delta in pixels, positive to the right.
    Wheel(f32),
    /// Periodic media event pump.
    MediaTick,
    /// Frame pull while the video overlay is visible.
    VideoTick,
    TimerFired(TimerId),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GREETING_REEL_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Optional asset directory override.
    /// Takes precedence over `GREETING_REEL_ASSETS_DIR`.
    pub assets_dir: Option<String>,
}
