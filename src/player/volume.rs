// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.
//!
//! The slider works in percent (0–100) while the media element and the
//! player state store a fraction (0.0–1.0).

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, UNMUTED_VOLUME};

/// Volume level, guaranteed to be within 0.0–1.0.
///
/// # Example
///
/// ```
/// use iced_tube::player::Volume;
///
/// let vol = Volume::from_percent(30.0);
/// assert!((vol.value() - 0.3).abs() < 1e-6);
///
/// // Values outside range are clamped
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    /// NaN is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// Creates a volume from a slider value in percent.
    #[must_use]
    pub fn from_percent(percent: f32) -> Self {
        Self::new(percent / 100.0)
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Volume as displayed on the slider.
    #[must_use]
    pub fn as_percent(self) -> f32 {
        self.0 * 100.0
    }

    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 <= MIN_VOLUME
    }

    /// Binary mute toggle: silent becomes full volume, anything else becomes silent.
    ///
    /// The previous level is not remembered, so unmuting after a custom level
    /// yields full volume.
    #[must_use]
    pub fn toggle_mute(self) -> Self {
        if self.is_muted() {
            Self(UNMUTED_VOLUME)
        } else {
            Self(MIN_VOLUME)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_abs_diff_eq!(Volume::new(-0.5).value(), MIN_VOLUME);
        assert_abs_diff_eq!(Volume::new(1.5).value(), MAX_VOLUME);
        assert_abs_diff_eq!(Volume::new(0.5).value(), 0.5);
        assert_abs_diff_eq!(Volume::new(f32::NAN).value(), MIN_VOLUME);
    }

    #[test]
    fn from_percent_divides_by_hundred() {
        for percent in [0.0_f32, 1.0, 30.0, 55.5, 100.0] {
            assert_abs_diff_eq!(
                Volume::from_percent(percent).value(),
                percent / 100.0,
                epsilon = 1e-6
            );
        }
        assert_abs_diff_eq!(Volume::from_percent(250.0).value(), 1.0);
        assert_abs_diff_eq!(Volume::from_percent(-10.0).value(), 0.0);
    }

    #[test]
    fn as_percent_scales_for_display() {
        assert_abs_diff_eq!(Volume::new(0.3).as_percent(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn default_is_full_volume() {
        assert_abs_diff_eq!(Volume::default().value(), 1.0);
        assert!(!Volume::default().is_muted());
    }

    #[test]
    fn toggle_mute_silences_any_audible_level() {
        assert!(Volume::new(0.3).toggle_mute().is_muted());
        assert!(Volume::new(1.0).toggle_mute().is_muted());
    }

    #[test]
    fn toggle_mute_does_not_restore_previous_level() {
        let restored = Volume::new(0.3).toggle_mute().toggle_mute();
        assert_abs_diff_eq!(restored.value(), 1.0);
    }
}
