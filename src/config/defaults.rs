// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration and player constants.
//!
//! # Categories
//!
//! - **Source**: Default media resource
//! - **Volume**: Audio level bounds
//! - **Playback Speed**: Selectable rate multipliers
//! - **Position**: Percentage bounds for the seek bar

// ==========================================================================
// Source Defaults
// ==========================================================================

/// Media resource played when neither config nor CLI names one.
pub const DEFAULT_SOURCE_URL: &str =
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Volume on mount (1.0 = 100%).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume restored by the mute toggle when currently silent.
pub const UNMUTED_VOLUME: f32 = MAX_VOLUME;

// ==========================================================================
// Playback Speed Defaults
// ==========================================================================

/// Rate multipliers offered by the speed picker, slowest first.
pub const PLAYBACK_SPEED_PRESETS: &[f64] = &[1.0, 2.0, 3.0];

// ==========================================================================
// Position Defaults
// ==========================================================================

/// Lower bound of the seek bar.
pub const MIN_PERCENTAGE: f64 = 0.0;

/// Upper bound of the seek bar.
pub const MAX_PERCENTAGE: f64 = 100.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VOLUME < MAX_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(UNMUTED_VOLUME > MIN_VOLUME);
    assert!(MIN_PERCENTAGE < MAX_PERCENTAGE);
    assert!(PLAYBACK_SPEED_PRESETS.len() == 3);
};
