// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and a recording media element.
//!
//! Re-exports the `approx` crate's assertion macros, which handle
//! floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::media::MediaElement;

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;

/// Calls received by a [`RecordingMedia`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    SetPlaybackRate(f64),
}

/// In-memory media element that records every mutating call.
#[derive(Debug, Clone)]
pub struct RecordingMedia {
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f32,
    pub playback_rate: f64,
    pub calls: Vec<MediaCall>,
}

impl RecordingMedia {
    pub fn count(&self, call: &MediaCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Default for RecordingMedia {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            playback_rate: 1.0,
            calls: Vec::new(),
        }
    }
}

impl MediaElement for RecordingMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_current_time(&mut self, secs: f64) {
        self.current_time = secs;
        self.calls.push(MediaCall::SetCurrentTime(secs));
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.calls.push(MediaCall::SetVolume(volume));
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
        self.calls.push(MediaCall::SetPlaybackRate(rate));
    }

    fn play(&mut self) {
        self.calls.push(MediaCall::Play);
    }

    fn pause(&mut self) {
        self.calls.push(MediaCall::Pause);
    }
}
