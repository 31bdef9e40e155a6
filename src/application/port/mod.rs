// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Infrastructure adapters implement these traits; the application core only
//! sees the traits and domain types.
//!
//! - [`media`]: the single audio channel
//! - [`clock`]: delayed single-shot events
//!
//! No port uses `async fn`. Callers turn pending work into Iced `Task`s.

pub mod clock;
pub mod media;

pub use clock::{Clock, TimerId};
pub use media::{MediaElement, MediaEvent, MediaEventKind, SourceToken};
