// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains the immutable catalog, the read-only state snapshots
//! handed to views, and the small value objects they are built from. It has no
//! dependencies on external crates (except `std`) so every rule here can be
//! tested without a window or an audio device.
//!
//! # Modules
//!
//! - [`catalog`]: Gallery entries and the photo-stack manifest
//!   ([`Catalog`](catalog::Catalog), [`CatalogEntry`](catalog::CatalogEntry))
//! - [`navigation`]: Top-level view state ([`NavigationState`](navigation::NavigationState))
//! - [`playback`]: Playback channel snapshot ([`PlaybackState`](playback::PlaybackState),
//!   [`Volume`](playback::Volume))
//! - [`unwrap`]: Gift reveal stages ([`UnwrapStage`](unwrap::UnwrapStage))

pub mod catalog;
pub mod navigation;
pub mod playback;
pub mod unwrap;
