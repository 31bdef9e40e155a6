// SPDX-License-Identifier: MPL-2.0
//! `greeting_reel` is an interactive birthday greeting built with the Iced GUI
//! framework.
//!
//! A welcome screen leads to a swipeable gallery of illustrated entries. Most
//! entries play a song and open a stack of polaroid photos, one opens a
//! looping video, and the last is a gift that unwraps in three taps.
//!
//! The crate is layered: [`domain`] holds plain value types, [`application`]
//! the UI-independent state machines and their ports, [`infrastructure`] the
//! FFmpeg/cpal adapters, and [`ui`] plus [`app`] the Iced front-end.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
