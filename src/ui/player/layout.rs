// SPDX-License-Identifier: MPL-2.0
//! Player presentation derived from [`PlayerState`].
//!
//! Nothing here is stored: the view recomputes the layout from the state on
//! every render, so toggling fullscreen twice always lands on the same layout.

use crate::player::PlayerState;
use crate::ui::design_tokens::sizing;
use iced::Length;

/// Width over height of the video surface outside fullscreen.
pub const VIDEO_ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Height of the video surface in the normal page layout.
pub const NORMAL_VIDEO_HEIGHT: f32 = sizing::CONTENT_MAX_WIDTH / VIDEO_ASPECT_RATIO;

/// Where the control bar sits relative to the video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsPlacement {
    /// Stacked under the video.
    Below,
    /// Overlaid on the bottom edge of the video.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerLayout {
    pub video_width: Length,
    pub video_height: Length,
    pub controls: ControlsPlacement,
    /// Description and related videos are rendered under the player.
    pub show_panels: bool,
}

impl PlayerLayout {
    #[must_use]
    pub fn from_state(state: &PlayerState) -> Self {
        if state.fullscreen {
            Self {
                video_width: Length::Fill,
                video_height: Length::Fill,
                controls: ControlsPlacement::Overlay,
                show_panels: false,
            }
        } else {
            Self {
                video_width: Length::Fill,
                video_height: Length::Fixed(NORMAL_VIDEO_HEIGHT),
                controls: ControlsPlacement::Below,
                show_panels: true,
            }
        }
    }

    pub fn is_overlay(&self) -> bool {
        self.controls == ControlsPlacement::Overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Message, Player};
    use crate::test_utils::{assert_abs_diff_eq, RecordingMedia};

    #[test]
    fn normal_layout_keeps_video_wide() {
        let layout = PlayerLayout::from_state(&PlayerState::default());
        assert_eq!(layout.controls, ControlsPlacement::Below);
        assert_eq!(layout.video_height, Length::Fixed(NORMAL_VIDEO_HEIGHT));
        assert!(layout.show_panels);
        assert_abs_diff_eq!(
            sizing::CONTENT_MAX_WIDTH / NORMAL_VIDEO_HEIGHT,
            VIDEO_ASPECT_RATIO,
            epsilon = 1e-4
        );
    }

    #[test]
    fn fullscreen_layout_fills_and_overlays_controls() {
        let state = PlayerState {
            fullscreen: true,
            ..PlayerState::default()
        };
        let layout = PlayerLayout::from_state(&state);
        assert!(layout.is_overlay());
        assert_eq!(layout.video_height, Length::Fill);
        assert!(!layout.show_panels);
    }

    #[test]
    fn toggling_twice_restores_layout() {
        let mut player: Player<RecordingMedia> = Player::new();
        let before = PlayerLayout::from_state(player.state());

        player.update(Message::ToggleFullscreen);
        assert_ne!(PlayerLayout::from_state(player.state()), before);

        player.update(Message::ToggleFullscreen);
        assert_eq!(PlayerLayout::from_state(player.state()), before);
    }
}
