// SPDX-License-Identifier: MPL-2.0
//! User interface views, following the Elm-style "state down, messages up"
//! pattern. Each view owns a small `Message` enum the app wraps.
//!
//! # Screens
//!
//! - [`welcome`] - Greeting shown at startup
//! - [`gallery`] - Swipeable slide with navigation dots
//! - [`gift_box`] - The gift slide's staged artwork
//! - [`photo_stack`] - Polaroid overlay
//! - [`video_overlay`] - Looping video overlay
//! - [`music_player`] - Player bar shown whenever a track is loaded
//!
//! # Shared Infrastructure
//!
//! - [`assets`] - Image handles for asset references
//! - [`styles`] - Centralized widget styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod assets;
pub mod design_tokens;
pub mod gallery;
pub mod gift_box;
pub mod music_player;
pub mod photo_stack;
pub mod styles;
pub mod theming;
pub mod video_overlay;
pub mod welcome;
