// SPDX-License-Identifier: MPL-2.0
//! Playback position expressed as a percentage of the total duration.

use crate::config::{MAX_PERCENTAGE, MIN_PERCENTAGE};

/// Position in percent, guaranteed to be a finite value within 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percentage(f64);

impl Percentage {
    /// Creates a percentage, clamping to 0–100. NaN becomes 0.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(MIN_PERCENTAGE);
        }
        Self(value.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE))
    }

    /// Computes `current / duration * 100`.
    ///
    /// An unknown, zero, negative or non-finite duration yields 0 instead of NaN.
    #[must_use]
    pub fn from_time(current_secs: f64, duration_secs: Option<f64>) -> Self {
        match duration_secs {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                Self::new(current_secs / duration * 100.0)
            }
            _ => Self(MIN_PERCENTAGE),
        }
    }

    /// Position in seconds for this percentage of `duration_secs`.
    #[must_use]
    pub fn to_time(self, duration_secs: f64) -> f64 {
        duration_secs / 100.0 * self.0
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}
