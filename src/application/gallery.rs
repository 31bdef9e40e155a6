// SPDX-License-Identifier: MPL-2.0
//! Index paging for the gallery.
//!
//! The carousel knows nothing about entries beyond their count. It turns
//! swipes, horizontal wheel deltas and dot clicks into an index within
//! `[0, len)`, and derives the track offset from it.

use crate::config::DEFAULT_SWIPE_THRESHOLD_PX;
use crate::error::NavigationError;

/// Result of releasing a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The index changed to the contained value.
    Moved(usize),
    /// Long enough to page, but already at the first or last entry.
    AtEdge,
    /// Too short to page; the front-end may treat it as a tap.
    Tap,
    /// No swipe was in progress.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct GalleryCarousel {
    len: usize,
    index: usize,
    swipe_start: Option<f32>,
    threshold: f32,
}

impl GalleryCarousel {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            swipe_start: None,
            threshold: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }

    /// Sets the minimum horizontal travel (exclusive) that pages.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.swipe_start.is_some()
    }

    pub fn swipe_begin(&mut self, x: f32) {
        self.swipe_start = Some(x);
    }

    /// Ends a swipe at `x`. A leftward swipe (start right of end) pages forward.
    pub fn swipe_end(&mut self, x: f32) -> SwipeOutcome {
        let Some(start) = self.swipe_start.take() else {
            return SwipeOutcome::Ignored;
        };

        let delta = start - x;
        if delta.abs() <= self.threshold {
            return SwipeOutcome::Tap;
        }

        let step = if delta > 0.0 { 1 } else { -1 };
        if self.step(step) {
            SwipeOutcome::Moved(self.index)
        } else {
            SwipeOutcome::AtEdge
        }
    }

    /// Drops an in-progress swipe, e.g. when the pointer leaves the window.
    pub fn cancel_swipe(&mut self) {
        self.swipe_start = None;
    }

    /// Pages by the sign of a horizontal wheel delta. Returns whether the
    /// index changed.
    pub fn wheel(&mut self, dx: f32) -> bool {
        if dx > 0.0 {
            self.step(1)
        } else if dx < 0.0 {
            self.step(-1)
        } else {
            false
        }
    }

    /// Jumps to `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::IndexOutOfRange`] when `index >= len`.
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        if index >= self.len {
            return Err(NavigationError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(())
    }

    /// Horizontal offset of the slide track, in percent of one slide.
    #[must_use]
    pub fn page_offset(&self) -> f32 {
        -(self.index as f32) * 100.0
    }

    fn step(&mut self, direction: i32) -> bool {
        let target = if direction > 0 {
            (self.index + 1).min(self.len.saturating_sub(1))
        } else {
            self.index.saturating_sub(1)
        };
        let changed = target != self.index;
        self.index = target;
        changed
    }
}
