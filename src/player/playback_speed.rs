// SPDX-License-Identifier: MPL-2.0
//! Playback speed choices offered by the speed picker.

use crate::config::PLAYBACK_SPEED_PRESETS;
use std::fmt;

/// Playback rate multiplier, restricted to the fixed set {1, 2, 3}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackSpeed {
    #[default]
    Normal,
    Double,
    Triple,
}

impl PlaybackSpeed {
    /// Every selectable speed, in picker order.
    pub const ALL: [PlaybackSpeed; 3] = [Self::Normal, Self::Double, Self::Triple];

    /// Rate multiplier applied to the media element.
    #[must_use]
    pub fn rate(self) -> f64 {
        match self {
            Self::Normal => PLAYBACK_SPEED_PRESETS[0],
            Self::Double => PLAYBACK_SPEED_PRESETS[1],
            Self::Triple => PLAYBACK_SPEED_PRESETS[2],
        }
    }

    /// Maps a raw rate back to a choice, if it is one of the presets.
    #[must_use]
    pub fn from_rate(rate: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.rate() - rate).abs() < 0.001)
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rate())
    }
}
