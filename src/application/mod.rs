// SPDX-License-Identifier: MPL-2.0
//! Application layer: the UI-independent core.
//!
//! - [`port`]: traits the infrastructure implements (audio element, clock)
//! - [`playback`]: the single audio channel
//! - [`gallery`]: index paging
//! - [`unwrap`]: the gift reveal
//! - [`photo_stack`]: the polaroid deck
//! - [`navigation`]: the coordinator owning all of the above
//! - [`testing`]: in-memory port implementations
//!
//! Nothing here depends on Iced, FFmpeg or cpal. All state is mutated from a
//! single thread; asynchronous outcomes arrive as events the caller pumps.

pub mod gallery;
pub mod navigation;
pub mod photo_stack;
pub mod playback;
pub mod port;
pub mod testing;
pub mod unwrap;

pub use gallery::{GalleryCarousel, SwipeOutcome};
pub use navigation::{ActivationOutcome, NavigationCoordinator};
pub use photo_stack::{PhotoCard, PhotoStack};
pub use playback::{PlaybackController, PlaybackNotice};
pub use unwrap::{RevealComplete, UnwrapSequence, UnwrapStep};
