// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
    Navigation(NavigationError),
}

/// Failures reported by the playback channel or the video decoder.
///
/// None of these are fatal: the caller logs them and the experience degrades
/// to "nothing audible/visible happens".
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The referenced file does not exist or cannot be read.
    SourceNotFound(String),

    /// The file exists but contains no audio (or video) stream.
    NoStream(String),

    /// Decoding failed while opening or during playback.
    DecodingFailed(String),

    /// No usable audio output device.
    OutputUnavailable(String),
}

impl MediaError {
    /// Attempts to classify a raw FFmpeg/cpal message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
        {
            return MediaError::SourceNotFound(msg.to_string());
        }

        if msg_lower.contains("no audio stream") || msg_lower.contains("no video stream") {
            return MediaError::NoStream(msg.to_string());
        }

        if msg_lower.contains("device") || msg_lower.contains("output") {
            return MediaError::OutputUnavailable(msg.to_string());
        }

        MediaError::DecodingFailed(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::SourceNotFound(msg) => write!(f, "Media source not found: {}", msg),
            MediaError::NoStream(msg) => write!(f, "No playable stream: {}", msg),
            MediaError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::OutputUnavailable(msg) => write!(f, "Audio output unavailable: {}", msg),
        }
    }
}

/// Caller contract violations on the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// An index outside `[0, len)` was supplied.
    IndexOutOfRange { index: usize, len: usize },

    /// The command is not valid from the current view.
    InvalidTransition {
        from: crate::domain::navigation::ActiveView,
        command: &'static str,
    },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for catalog of {}", index, len)
            }
            NavigationError::InvalidTransition { from, command } => {
                write!(f, "`{}` is not valid from {:?}", command, from)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
            Error::Navigation(e) => write!(f, "Navigation Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<NavigationError> for Error {
    fn from(err: NavigationError) -> Self {
        Error::Navigation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
