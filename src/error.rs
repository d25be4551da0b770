// SPDX-License-Identifier: MPL-2.0
//! Crate error types.
//!
//! [`Error`] covers I/O, configuration and media failures behind the crate
//! [`Result`] alias. [`MediaError`] sorts raw FFmpeg and decoder messages
//! into kinds the UI can show as localized text.
//!
//! ```
//! use iced_tube::error::MediaError;
//!
//! let err = MediaError::from_message("Failed to open http://host/v.mp4: Connection refused");
//! assert_eq!(err.i18n_key(), "error-media-source-unavailable");
//! ```

use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Media pipeline failures, categorized for logging and localized display.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The source could not be opened (unreachable host, missing file, refused connection).
    SourceUnavailable(String),

    /// Video codec is not supported by the system's FFmpeg
    UnsupportedCodec(String),

    /// Source opened but contains no video stream
    NoVideoStream,

    /// Decoding failed during playback
    DecodingFailed(String),

    /// Generic error with raw message
    Other(String),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MediaError::SourceUnavailable(_) => "error-media-source-unavailable",
            MediaError::UnsupportedCodec(_) => "error-media-unsupported-codec",
            MediaError::NoVideoStream => "error-media-no-video-stream",
            MediaError::DecodingFailed(_) => "error-media-decoding-failed",
            MediaError::Other(_) => "error-media-general",
        }
    }

    /// Categorizes a raw FFmpeg/decoder message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Codec errors first, they may also contain "not found"
        if msg_lower.contains("codec") || msg_lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&msg_lower) {
                return MediaError::UnsupportedCodec(codec);
            } else if msg_lower.contains("not found") || msg_lower.contains("unsupported") {
                return MediaError::DecodingFailed(msg.to_string());
            }
        }

        if msg_lower.contains("no video stream") {
            return MediaError::NoVideoStream;
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("connection")
            || msg_lower.contains("failed to open")
            || msg_lower.contains("i/o error")
        {
            return MediaError::SourceUnavailable(msg.to_string());
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("seek")
            || msg_lower.contains("decode")
        {
            return MediaError::DecodingFailed(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        let codecs = [
            "h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2",
        ];
        codecs
            .iter()
            .find(|codec| msg.contains(*codec))
            .map(|codec| codec.to_uppercase())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::SourceUnavailable(msg) => write!(f, "Media source unavailable: {}", msg),
            MediaError::UnsupportedCodec(codec) => {
                write!(f, "Unsupported video codec: {}", codec)
            }
            MediaError::NoVideoStream => write!(f, "No video stream found"),
            MediaError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
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
