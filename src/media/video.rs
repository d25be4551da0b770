// SPDX-License-Identifier: MPL-2.0
//! FFmpeg initialization and stream metadata.

use crate::error::{MediaError, Result};
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg and lowers its log level to errors.
///
/// Safe to call repeatedly; only the first call does any work.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(
                MediaError::Other(format!("FFmpeg initialization failed: {e}")).into(),
            );
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Metadata read when the source is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Duration in seconds, `None` for live or unknown-length sources.
    pub duration_secs: Option<f64>,
}

/// FFmpeg's `AV_TIME_BASE`: container timestamps are in microseconds.
pub const AV_TIME_BASE: f64 = 1_000_000.0;

/// Converts an FFmpeg container duration (in `AV_TIME_BASE` units) to seconds.
///
/// FFmpeg reports unknown durations as `AV_NOPTS_VALUE` (`i64::MIN`) or zero.
pub fn duration_from_av(raw: i64) -> Option<f64> {
    if raw <= 0 {
        return None;
    }
    Some(raw as f64 / AV_TIME_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn init_ffmpeg_is_idempotent() {
        assert!(init_ffmpeg().is_ok());
        assert!(init_ffmpeg().is_ok());
    }

    #[test]
    fn duration_from_av_converts_microseconds() {
        let secs = duration_from_av(596_460_000).expect("known duration");
        assert_abs_diff_eq!(secs, 596.46, epsilon = 1e-9);
    }

    #[test]
    fn duration_from_av_rejects_unknown_values() {
        assert_eq!(duration_from_av(0), None);
        assert_eq!(duration_from_av(-1), None);
        assert_eq!(duration_from_av(i64::MIN), None);
    }
}
