// SPDX-License-Identifier: MPL-2.0
//! Muted, looping video playback for the video overlay.
//!
//! A decoder thread converts frames to RGBA, paces them by presentation
//! timestamp and seeks back to the start at end of stream. Frames go through
//! a small bounded channel; the UI pulls the newest one on its frame tick.
//! Dropping the [`VideoLoop`] closes the channel and the thread exits.

use crate::error::MediaError;
use crate::infrastructure::ffmpeg;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Frames are downscaled so neither side exceeds this many pixels.
pub const MAX_FRAME_EDGE: u32 = 1280;

/// Decoded frames buffered ahead of the UI.
const FRAME_QUEUE_DEPTH: usize = 2;

/// One RGBA frame ready for display.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

/// What the decoder thread delivers.
#[derive(Debug, Clone)]
pub enum VideoUpdate {
    Frame(VideoFrame),
    Failed(MediaError),
}

/// Handle to a running looping decoder.
#[derive(Debug)]
pub struct VideoLoop {
    updates: mpsc::Receiver<VideoUpdate>,
}

impl VideoLoop {
    /// Starts decoding `path` in the background.
    ///
    /// # Errors
    ///
    /// [`MediaError::SourceNotFound`] when the file is missing. Problems found
    /// after opening arrive as [`VideoUpdate::Failed`].
    pub fn start(path: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let path = path.into();
        if !path.exists() {
            return Err(MediaError::SourceNotFound(path.display().to_string()));
        }

        let (tx, rx) = mpsc::channel(FRAME_QUEUE_DEPTH);
        let thread_path = path.clone();
        thread::Builder::new()
            .name("video-loop".into())
            .spawn(move || {
                if let Err(err) = decode_loop(&thread_path, &tx) {
                    tracing::warn!(path = %thread_path.display(), "video loop stopped: {err}");
                    let _ = tx.blocking_send(VideoUpdate::Failed(err));
                }
            })
            .map_err(|e| MediaError::DecodingFailed(format!("video thread: {e}")))?;

        tracing::debug!(path = %path.display(), "video loop started");
        Ok(Self { updates: rx })
    }

    /// Drains pending updates, returning the newest frame and any failure.
    pub fn latest(&mut self) -> (Option<VideoFrame>, Option<MediaError>) {
        let mut frame = None;
        let mut failure = None;
        while let Ok(update) = self.updates.try_recv() {
            match update {
                VideoUpdate::Frame(f) => frame = Some(f),
                VideoUpdate::Failed(err) => failure = Some(err),
            }
        }
        (frame, failure)
    }
}

/// Output size preserving aspect ratio within [`MAX_FRAME_EDGE`].
#[must_use]
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge || longest == 0 {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    // Even dimensions keep chroma subsampled sources happy.
    let scaled = |v: u32| (((f64::from(v) * scale).round() as u32).max(2)) & !1;
    (scaled(width), scaled(height))
}

fn decode_loop(path: &Path, tx: &mpsc::Sender<VideoUpdate>) -> Result<(), MediaError> {
    let mut ictx = ffmpeg::open_input(path)?;
    let stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| MediaError::NoStream(format!("no video stream in {}", path.display())))?;
    let stream_index = stream.index();
    let time_base = stream.time_base();

    let mut decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .and_then(|ctx| ctx.decoder().video())
        .map_err(|e| MediaError::DecodingFailed(format!("video decoder: {e}")))?;

    let (width, height) = fit_within(decoder.width(), decoder.height(), MAX_FRAME_EDGE);
    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| MediaError::DecodingFailed(format!("scaler: {e}")))?;

    let mut loop_start = Instant::now();
    let mut emitted_any = false;

    loop {
        let mut fed = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != stream_index {
                continue;
            }
            if decoder.send_packet(&packet).is_ok() {
                fed = true;
                break;
            }
        }

        if !fed {
            if !emitted_any {
                return Err(MediaError::DecodingFailed(format!(
                    "no decodable frames in {}",
                    path.display()
                )));
            }
            ffmpeg::seek_to(&mut ictx, 0.0)?;
            decoder.flush();
            loop_start = Instant::now();
            continue;
        }

        let mut decoded = ffmpeg_next::frame::Video::empty();
        while decoder.receive_frame(&mut decoded).is_ok() {
            let mut rgba = ffmpeg_next::frame::Video::empty();
            scaler
                .run(&decoded, &mut rgba)
                .map_err(|e| MediaError::DecodingFailed(format!("scaling failed: {e}")))?;

            let pts = decoded
                .timestamp()
                .map_or(0.0, |pts| ffmpeg::pts_to_secs(pts, time_base));
            let due = loop_start + Duration::from_secs_f64(pts.max(0.0));
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }

            let frame = VideoFrame {
                width,
                height,
                rgba: Arc::new(tight_rows(rgba.data(0), rgba.stride(0), width, height)),
            };
            if tx.blocking_send(VideoUpdate::Frame(frame)).is_err() {
                // Receiver dropped: the overlay was closed.
                return Ok(());
            }
            emitted_any = true;
        }
    }
}

/// Copies `height` rows of `width` RGBA pixels out of a strided plane.
fn tight_rows(data: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(stride.max(1)).take(height as usize) {
        out.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_frames_are_not_scaled() {
        assert_eq!(fit_within(640, 360, MAX_FRAME_EDGE), (640, 360));
    }

    #[test]
    fn large_frames_keep_aspect_ratio() {
        assert_eq!(fit_within(3840, 2160, 1280), (1280, 720));
        assert_eq!(fit_within(1080, 1920, 1280), (720, 1280));
    }

    #[test]
    fn scaled_dimensions_are_even() {
        let (w, h) = fit_within(1999, 1001, 1000);
        assert_eq!(w % 2, 0);
        assert_eq!(h % 2, 0);
    }

    #[test]
    fn stride_padding_is_removed() {
        // 2x2 RGBA with 4 bytes of padding per row.
        let mut data = Vec::new();
        data.extend_from_slice(&[1; 8]);
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&[2; 8]);
        data.extend_from_slice(&[0; 4]);
        let out = tight_rows(&data, 12, 2, 2);
        assert_eq!(out.len(), 16);
        assert!(out[..8].iter().all(|&b| b == 1));
        assert!(out[8..].iter().all(|&b| b == 2));
    }

    #[test]
    fn missing_video_is_reported_upfront() {
        let result = VideoLoop::start("/nonexistent/zumba.mp4");
        assert!(matches!(result, Err(MediaError::SourceNotFound(_))));
    }

    #[test]
    fn garbage_file_reports_failure() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"definitely not a video").expect("write");

        let mut video = VideoLoop::start(&path).expect("file exists");
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let (frame, failure) = video.latest();
            assert!(frame.is_none());
            if failure.is_some() {
                break;
            }
            assert!(Instant::now() < deadline, "no failure reported");
            thread::sleep(Duration::from_millis(20));
        }
    }
}
