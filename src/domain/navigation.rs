// SPDX-License-Identifier: MPL-2.0
//! Which top-level view is visible and which gallery entry is selected.

/// The top-level views. Overlays cover the gallery; the welcome screen is
/// shown once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Welcome,
    Gallery,
    PhotoStackOverlay,
    VideoOverlay,
}

impl ActiveView {
    #[must_use]
    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            ActiveView::PhotoStackOverlay | ActiveView::VideoOverlay
        )
    }
}

/// Snapshot of the navigation core. Views receive copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub active_view: ActiveView,
    pub selected_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_welcome_at_first_entry() {
        let state = NavigationState::default();
        assert_eq!(state.active_view, ActiveView::Welcome);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn only_photo_and_video_are_overlays() {
        assert!(!ActiveView::Welcome.is_overlay());
        assert!(!ActiveView::Gallery.is_overlay());
        assert!(ActiveView::PhotoStackOverlay.is_overlay());
        assert!(ActiveView::VideoOverlay.is_overlay());
    }
}
