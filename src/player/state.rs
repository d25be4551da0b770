// SPDX-License-Identifier: MPL-2.0
//! Flat state record rendered by the player.
//!
//! The record is a projection of the media element: position and volume are
//! read back from the element, `playing` is the requested intention that the
//! reconcile step pushes to the element.

use super::{Percentage, PlaybackSpeed, Volume};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    /// Playback is requested.
    pub playing: bool,

    /// Current position as percent of duration.
    pub percentage: Percentage,

    /// Audio level; zero means muted.
    pub volume: Volume,

    /// The player occupies the whole window.
    pub fullscreen: bool,

    /// The pointer is over the volume control, revealing its slider.
    pub volume_bar_visible: bool,

    /// Last rate picked in the speed selector.
    pub speed: PlaybackSpeed,
}

impl PlayerState {
    /// Audible or muted, for picking the volume icon.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }
}
