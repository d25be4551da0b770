// SPDX-License-Identifier: MPL-2.0
//! Player state and control logic.
//!
//! [`Player`] owns the flat [`PlayerState`] and an optional binding to a
//! [`MediaElement`]. Every control message runs one handler followed by the
//! reconcile step, which pushes the requested play/pause intention to the
//! element whenever it differs from what was last applied. Handlers never
//! call `play()`/`pause()` themselves.

mod percentage;
mod playback_speed;
mod state;
mod volume;

pub use percentage::Percentage;
pub use playback_speed::PlaybackSpeed;
pub use state::PlayerState;
pub use volume::Volume;

use crate::media::MediaElement;

/// Control and media events handled by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Play/pause button pressed.
    TogglePlayback,

    /// Progress notification from the media element.
    TimeUpdate,

    /// The media element stopped by itself at the end of the resource.
    Ended,

    /// Seek slider moved, value in percent (0–100).
    Seek(f64),

    /// Volume slider moved, value in percent (0–100).
    SetVolume(f32),

    /// Volume icon pressed.
    ToggleMute,

    /// Pointer entered the volume control.
    ShowVolumeBar,

    /// Pointer left the volume control.
    HideVolumeBar,

    /// Speed picked in the selector.
    SetPlaybackSpeed(PlaybackSpeed),

    /// Fullscreen button pressed.
    ToggleFullscreen,
}

/// Player controller bound to a media element of type `M`.
#[derive(Debug)]
pub struct Player<M> {
    state: PlayerState,
    media: Option<M>,
    /// Play intention last pushed to the bound element.
    applied_playing: Option<bool>,
}

impl<M> Default for Player<M> {
    fn default() -> Self {
        Self {
            state: PlayerState::default(),
            media: None,
            applied_playing: None,
        }
    }
}

impl<M: MediaElement> Player<M> {
    /// Creates an unbound player with mount defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    /// Mutable access for adapters feeding events into the element.
    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    /// Binds a media element and applies the current play intention to it.
    pub fn bind(&mut self, media: M) {
        self.media = Some(media);
        self.applied_playing = None;
        self.reconcile();
    }

    /// Drops the media binding, returning the previous element.
    pub fn unbind(&mut self) -> Option<M> {
        self.applied_playing = None;
        self.media.take()
    }

    /// Applies one message, then reconciles the element with the state.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::TogglePlayback => self.toggle_playback(),
            Message::TimeUpdate => self.handle_time_update(),
            Message::Ended => self.handle_ended(),
            Message::Seek(percent) => self.seek(percent),
            Message::SetVolume(percent) => self.set_volume(percent),
            Message::ToggleMute => self.toggle_mute(),
            Message::ShowVolumeBar => self.state.volume_bar_visible = true,
            Message::HideVolumeBar => self.state.volume_bar_visible = false,
            Message::SetPlaybackSpeed(speed) => self.set_playback_speed(speed),
            Message::ToggleFullscreen => self.state.fullscreen = !self.state.fullscreen,
        }
        self.reconcile();
    }

    fn toggle_playback(&mut self) {
        self.state.playing = !self.state.playing;
    }

    /// Reads position, volume and rate back from the element.
    fn handle_time_update(&mut self) {
        let Some(media) = &self.media else {
            return;
        };
        self.state.percentage = Percentage::from_time(media.current_time(), media.duration());
        self.state.volume = Volume::new(media.volume());
        // A rate outside the presets keeps the last picked speed on display
        if let Some(speed) = PlaybackSpeed::from_rate(media.playback_rate()) {
            self.state.speed = speed;
        }
    }

    /// The element has already stopped, so the paused state is recorded as
    /// applied and no `pause()` goes out. The next toggle plays again.
    fn handle_ended(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.state.playing = false;
        self.applied_playing = Some(false);
    }

    /// Seeks to `percent` of the duration. No-op until the duration is known.
    fn seek(&mut self, percent: f64) {
        let Some(media) = &mut self.media else {
            return;
        };
        let Some(duration) = media.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            log::debug!("Seek ignored, duration not known yet");
            return;
        };

        let target = Percentage::new(percent);
        media.set_current_time(target.to_time(duration));
        // Shown immediately; the next time update replaces it with the element's position
        self.state.percentage = target;
    }

    fn set_volume(&mut self, percent: f32) {
        self.apply_volume(Volume::from_percent(percent));
    }

    fn toggle_mute(&mut self) {
        self.apply_volume(self.state.volume.toggle_mute());
    }

    fn apply_volume(&mut self, volume: Volume) {
        if let Some(media) = &mut self.media {
            media.set_volume(volume.value());
        }
        self.state.volume = volume;
    }

    fn set_playback_speed(&mut self, speed: PlaybackSpeed) {
        if let Some(media) = &mut self.media {
            media.set_playback_rate(speed.rate());
        }
        self.state.speed = speed;
    }

    /// Pushes the play intention to the element if it changed since last applied.
    fn reconcile(&mut self) {
        let Some(media) = &mut self.media else {
            return;
        };
        let wanted = self.state.playing;
        if self.applied_playing == Some(wanted) {
            return;
        }

        if wanted {
            media.play();
        } else {
            media.pause();
        }
        self.applied_playing = Some(wanted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, MediaCall, RecordingMedia};

    fn bound_player(duration: Option<f64>) -> Player<RecordingMedia> {
        let mut player = Player::new();
        player.bind(RecordingMedia {
            duration,
            ..RecordingMedia::default()
        });
        player
    }

    fn calls(player: &Player<RecordingMedia>) -> &[MediaCall] {
        &player.media().expect("media bound").calls
    }

    #[test]
    fn binding_applies_current_intention_once() {
        let player = bound_player(None);
        assert_eq!(calls(&player), [MediaCall::Pause]);
    }

    #[test]
    fn toggle_flips_playing_and_drives_exactly_one_call() {
        let mut player = bound_player(Some(10.0));

        player.update(Message::TogglePlayback);
        assert!(player.state().playing);
        assert_eq!(calls(&player).last(), Some(&MediaCall::Play));
        assert_eq!(player.media().unwrap().count(&MediaCall::Play), 1);

        player.update(Message::TogglePlayback);
        assert!(!player.state().playing);
        assert_eq!(calls(&player).last(), Some(&MediaCall::Pause));
        // One pause from binding, one from the toggle
        assert_eq!(player.media().unwrap().count(&MediaCall::Pause), 2);
    }

    #[test]
    fn unrelated_messages_do_not_touch_playback() {
        let mut player = bound_player(Some(10.0));
        player.update(Message::TogglePlayback);
        let before = calls(&player).len();

        player.update(Message::ShowVolumeBar);
        player.update(Message::ToggleFullscreen);
        player.update(Message::TimeUpdate);

        assert_eq!(calls(&player).len(), before);
    }

    #[test]
    fn toggle_without_media_still_flips_state() {
        let mut player: Player<RecordingMedia> = Player::new();
        player.update(Message::TogglePlayback);
        assert!(player.state().playing);
    }

    #[test]
    fn intention_recorded_before_binding_is_applied_on_bind() {
        let mut player = Player::new();
        player.update(Message::TogglePlayback);
        player.bind(RecordingMedia::default());
        assert_eq!(calls(&player), [MediaCall::Play]);
    }

    #[test]
    fn time_update_recomputes_percentage_from_element() {
        let mut player = bound_player(Some(200.0));
        player.media_mut().unwrap().current_time = 50.0;
        player.update(Message::TimeUpdate);
        assert_abs_diff_eq!(player.state().percentage.value(), 25.0);
    }

    #[test]
    fn time_update_reads_volume_and_speed_back() {
        let mut player = bound_player(Some(200.0));
        {
            let media = player.media_mut().unwrap();
            media.volume = 0.4;
            media.playback_rate = 2.0;
        }
        player.update(Message::TimeUpdate);

        assert_abs_diff_eq!(player.state().volume.value(), 0.4, epsilon = 1e-6);
        assert_eq!(player.state().speed, PlaybackSpeed::Double);
    }

    #[test]
    fn time_update_keeps_speed_for_rates_outside_presets() {
        let mut player = bound_player(Some(200.0));
        player.update(Message::SetPlaybackSpeed(PlaybackSpeed::Triple));
        player.media_mut().unwrap().playback_rate = 1.5;
        player.update(Message::TimeUpdate);
        assert_eq!(player.state().speed, PlaybackSpeed::Triple);
    }

    #[test]
    fn ended_shows_paused_without_calling_pause() {
        let mut player = bound_player(Some(10.0));
        player.update(Message::TogglePlayback);
        let pauses = player.media().unwrap().count(&MediaCall::Pause);

        player.update(Message::Ended);
        assert!(!player.state().playing);
        assert_eq!(player.media().unwrap().count(&MediaCall::Pause), pauses);

        // One press plays again
        player.update(Message::TogglePlayback);
        assert!(player.state().playing);
        assert_eq!(player.media().unwrap().count(&MediaCall::Play), 2);
    }

    #[test]
    fn ended_without_media_is_ignored() {
        let mut player: Player<RecordingMedia> = Player::new();
        player.update(Message::TogglePlayback);
        player.update(Message::Ended);
        assert!(player.state().playing);
    }

    #[test]
    fn time_update_without_duration_yields_zero() {
        let mut player = bound_player(None);
        player.media_mut().unwrap().current_time = 50.0;
        player.update(Message::TimeUpdate);
        assert_abs_diff_eq!(player.state().percentage.value(), 0.0);
    }

    #[test]
    fn seek_sets_element_time_and_stores_input() {
        let mut player = bound_player(Some(120.0));
        player.update(Message::Seek(50.0));
        assert_eq!(calls(&player).last(), Some(&MediaCall::SetCurrentTime(60.0)));
        assert_abs_diff_eq!(player.state().percentage.value(), 50.0);
    }

    #[test]
    fn seek_before_metadata_is_a_noop() {
        let mut player = bound_player(None);
        player.update(Message::Seek(40.0));
        assert_eq!(calls(&player), [MediaCall::Pause]);
        assert_abs_diff_eq!(player.state().percentage.value(), 0.0);
    }

    #[test]
    fn seek_without_media_is_a_noop() {
        let mut player: Player<RecordingMedia> = Player::new();
        player.update(Message::Seek(40.0));
        assert_abs_diff_eq!(player.state().percentage.value(), 0.0);
    }

    #[test]
    fn seek_then_time_update_converges() {
        let mut player = bound_player(Some(734.0));
        for p in [0.0, 7.5, 33.0, 50.0, 99.0, 100.0] {
            player.update(Message::Seek(p));
            player.update(Message::TimeUpdate);
            assert_abs_diff_eq!(player.state().percentage.value(), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn volume_is_stored_as_fraction_and_forwarded() {
        let mut player = bound_player(None);
        player.update(Message::SetVolume(30.0));
        assert_abs_diff_eq!(player.state().volume.value(), 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(player.media().unwrap().volume, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn volume_input_is_clamped() {
        let mut player = bound_player(None);
        player.update(Message::SetVolume(180.0));
        assert_abs_diff_eq!(player.state().volume.value(), 1.0);
        player.update(Message::SetVolume(-4.0));
        assert_abs_diff_eq!(player.state().volume.value(), 0.0);
    }

    #[test]
    fn mute_toggle_is_lossy() {
        let mut player = bound_player(None);
        player.update(Message::SetVolume(30.0));
        player.update(Message::ToggleMute);
        assert_abs_diff_eq!(player.state().volume.value(), 0.0);
        player.update(Message::ToggleMute);
        assert_abs_diff_eq!(player.state().volume.value(), 1.0);
        assert_abs_diff_eq!(player.media().unwrap().volume, 1.0);
    }

    #[test]
    fn volume_bar_visibility_is_idempotent() {
        let mut player: Player<RecordingMedia> = Player::new();
        player.update(Message::ShowVolumeBar);
        player.update(Message::ShowVolumeBar);
        assert!(player.state().volume_bar_visible);
        player.update(Message::HideVolumeBar);
        assert!(!player.state().volume_bar_visible);
        player.update(Message::HideVolumeBar);
        assert!(!player.state().volume_bar_visible);
    }

    #[test]
    fn speed_sets_rate_and_is_remembered() {
        let mut player = bound_player(None);
        player.update(Message::SetPlaybackSpeed(PlaybackSpeed::Triple));
        assert_eq!(calls(&player).last(), Some(&MediaCall::SetPlaybackRate(3.0)));
        assert_eq!(player.state().speed, PlaybackSpeed::Triple);
    }

    #[test]
    fn fullscreen_toggle_is_self_inverse() {
        let mut player: Player<RecordingMedia> = Player::new();
        let original = *player.state();
        player.update(Message::ToggleFullscreen);
        assert!(player.state().fullscreen);
        player.update(Message::ToggleFullscreen);
        assert_eq!(*player.state(), original);
    }

    #[test]
    fn unbind_resets_reconcile_tracking() {
        let mut player = bound_player(None);
        player.update(Message::TogglePlayback);
        let old = player.unbind().expect("was bound");
        assert_eq!(old.count(&MediaCall::Play), 1);

        player.bind(RecordingMedia::default());
        assert_eq!(calls(&player), [MediaCall::Play]);
    }
}
