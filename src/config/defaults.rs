// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Playback**: autoplay and volume
//! - **Gallery**: swipe threshold
//! - **Gift**: reveal display window
//! - **Polling**: media event and video frame cadence

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Start a track as soon as it is ready.
pub const DEFAULT_AUTOPLAY: bool = true;

/// Default output volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

pub const MIN_VOLUME: f32 = 0.0;

pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Horizontal travel a swipe must exceed to page, in logical pixels.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

pub const MIN_SWIPE_THRESHOLD_PX: f32 = 5.0;

pub const MAX_SWIPE_THRESHOLD_PX: f32 = 400.0;

// ==========================================================================
// Gift Defaults
// ==========================================================================

/// How long the ticket is shown before the reveal completes (ms).
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 3_000;

pub const MIN_REVEAL_DELAY_MS: u64 = 100;

pub const MAX_REVEAL_DELAY_MS: u64 = 60_000;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Interval at which audio element events are drained (ms).
pub const MEDIA_POLL_INTERVAL_MS: u64 = 100;

/// Interval at which decoded video frames are pulled (ms), about 30 fps.
pub const VIDEO_FRAME_INTERVAL_MS: u64 = 33;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);

    assert!(MIN_SWIPE_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX >= MIN_SWIPE_THRESHOLD_PX);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX <= MAX_SWIPE_THRESHOLD_PX);

    assert!(DEFAULT_REVEAL_DELAY_MS >= MIN_REVEAL_DELAY_MS);
    assert!(DEFAULT_REVEAL_DELAY_MS <= MAX_REVEAL_DELAY_MS);

    assert!(VIDEO_FRAME_INTERVAL_MS < MEDIA_POLL_INTERVAL_MS);
};
