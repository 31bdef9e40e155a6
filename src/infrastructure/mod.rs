// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the ports in `application::port`, wrapping
//! `FFmpeg`, cpal and the Iced runtime.
//!
//! - [`audio_output`]: the cpal device stream and its sample queue
//! - [`audio_element`]: [`MediaElement`] decoding files with `FFmpeg`
//! - [`video_loop`]: muted looping video frames for the overlay
//! - [`timer`]: [`Clock`] backed by Iced tasks
//! - [`ffmpeg`]: shared `FFmpeg` helpers
//!
//! [`MediaElement`]: crate::application::port::MediaElement
//! [`Clock`]: crate::application::port::Clock

pub mod audio_element;
pub mod audio_output;
pub mod ffmpeg;
pub mod timer;
pub mod video_loop;

pub use audio_element::FfmpegAudioElement;
pub use audio_output::{AudioOutput, AudioOutputConfig, AudioSink};
pub use timer::IcedClock;
pub use video_loop::{VideoFrame, VideoLoop};
