// SPDX-License-Identifier: MPL-2.0
//! Media element port.
//!
//! The player drives playback through this trait only. Infrastructure
//! adapters (like [`RemoteVideo`](super::RemoteVideo)) implement it.
//!
//! # Design Notes
//!
//! - Methods never fail: adapters absorb and log transport problems
//! - `duration()` is `None` until the resource metadata has loaded
//! - Methods are not `async`; adapters forward work to their own threads

/// Port for a playable resource.
pub trait MediaElement {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total duration in seconds, if known.
    fn duration(&self) -> Option<f64>;

    /// Moves the playback position.
    fn set_current_time(&mut self, secs: f64);

    /// Audio level fraction (0.0–1.0).
    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    /// Playback rate multiplier (1.0 = normal speed).
    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    /// Starts or resumes playback.
    fn play(&mut self);

    /// Pauses playback at the current position.
    fn pause(&mut self);
}
