// SPDX-License-Identifier: MPL-2.0
//! Audio channel value objects.

/// Read-only snapshot of the single audio channel.
///
/// `is_playing` implies `source.is_some()`; times are never negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub source: Option<String>,
    pub track_title: String,
    pub is_playing: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds, 0 while unknown.
    pub duration: f64,
    /// The element has reported it can play the current source.
    pub is_loaded: bool,
}

impl PlaybackState {
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// True between a load and the first readiness report.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.source.is_some() && !self.is_loaded
    }
}

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    pub const DEFAULT: f32 = 0.8;
}

/// Output volume, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a volume level, clamping to the valid range. NaN maps to the
    /// default level.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self::default();
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}
