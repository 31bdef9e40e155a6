// SPDX-License-Identifier: MPL-2.0
//! Shared `FFmpeg` plumbing for the audio element and the video loop.

use crate::error::MediaError;
use std::path::Path;
use std::sync::Once;

static FFMPEG_INIT: Once = Once::new();

/// Initializes `FFmpeg` once per process and silences its console chatter.
///
/// # Errors
///
/// Returns [`MediaError::DecodingFailed`] if the first initialization fails.
pub fn init_ffmpeg() -> Result<(), MediaError> {
    let mut init_result = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(MediaError::DecodingFailed(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }

        // SAFETY: av_log_set_level only stores the global log threshold.
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Opens a container, mapping failures onto [`MediaError`].
pub(crate) fn open_input(path: &Path) -> Result<ffmpeg_next::format::context::Input, MediaError> {
    if !path.exists() {
        return Err(MediaError::SourceNotFound(path.display().to_string()));
    }
    init_ffmpeg()?;
    ffmpeg_next::format::input(&path).map_err(|e| {
        MediaError::from_message(&format!("Failed to open {}: {e}", path.display()))
    })
}

/// Container duration in seconds, if the demuxer knows it.
pub(crate) fn container_duration_secs(ictx: &ffmpeg_next::format::context::Input) -> Option<f64> {
    let duration = ictx.duration();
    if duration <= 0 {
        return None;
    }
    Some(duration as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE))
}

/// Seeks the container to `secs`, landing on the nearest earlier keyframe.
pub(crate) fn seek_to(
    ictx: &mut ffmpeg_next::format::context::Input,
    secs: f64,
) -> Result<(), MediaError> {
    let timestamp = (secs.max(0.0) * f64::from(ffmpeg_next::ffi::AV_TIME_BASE)) as i64;
    ictx.seek(timestamp, ..timestamp)
        .map_err(|e| MediaError::DecodingFailed(format!("Seek failed: {e}")))
}

/// Converts a stream timestamp to seconds.
pub(crate) fn pts_to_secs(pts: i64, time_base: ffmpeg_next::Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    pts as f64 * f64::from(time_base.numerator()) / f64::from(time_base.denominator())
}
