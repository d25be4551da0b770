// SPDX-License-Identifier: MPL-2.0
//! FFmpeg-backed [`MediaElement`] adapter.
//!
//! Mutations are forwarded to the decoder as commands. Position is read back
//! from decoded frame timestamps and duration from the source metadata, so
//! the element reflects what the decoder actually did.
//!
//! Frames already queued when a seek is issued still carry the old position.
//! Until the decoder acknowledges every outstanding seek, incoming frames are
//! rejected so they cannot drag the position back.

use super::decoder::{DecoderCommand, DecoderCommandSender};
use super::element::MediaElement;
use super::video::VideoMetadata;
use crate::config::DEFAULT_VOLUME;

#[derive(Debug, Clone)]
pub struct RemoteVideo {
    commands: DecoderCommandSender,
    metadata: Option<VideoMetadata>,
    position_secs: f64,
    volume: f32,
    playback_rate: f64,
    /// Seeks sent but not yet acknowledged by the decoder.
    pending_seeks: u32,
}

impl RemoteVideo {
    pub fn new(commands: DecoderCommandSender) -> Self {
        Self {
            commands,
            metadata: None,
            position_secs: 0.0,
            volume: DEFAULT_VOLUME,
            playback_rate: 1.0,
            pending_seeks: 0,
        }
    }

    /// Records source metadata once the decoder has opened the stream.
    pub fn set_metadata(&mut self, metadata: VideoMetadata) {
        self.metadata = Some(metadata);
    }

    /// Records the timestamp of a decoded frame.
    ///
    /// Returns `false` for frames decoded before a pending seek, which must
    /// not be shown.
    pub fn observe_frame(&mut self, pts_secs: f64) -> bool {
        if self.pending_seeks > 0 {
            return false;
        }
        if pts_secs.is_finite() {
            self.position_secs = pts_secs.max(0.0);
        }
        true
    }

    /// The decoder finished one seek.
    pub fn seek_completed(&mut self) {
        self.pending_seeks = self.pending_seeks.saturating_sub(1);
    }

    fn send(&self, command: DecoderCommand) -> bool {
        match self.commands.send(command) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Dropping media command: {}", err);
                false
            }
        }
    }
}

impl MediaElement for RemoteVideo {
    fn current_time(&self) -> f64 {
        self.position_secs
    }

    fn duration(&self) -> Option<f64> {
        self.metadata.and_then(|m| m.duration_secs)
    }

    fn set_current_time(&mut self, secs: f64) {
        self.position_secs = secs.max(0.0);
        if self.send(DecoderCommand::Seek {
            target_secs: self.position_secs,
        }) {
            self.pending_seeks += 1;
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Err(err) = self.commands.set_volume(volume) {
            log::warn!("Dropping volume change: {}", err);
        }
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
        let _ = self.send(DecoderCommand::SetRate(rate));
    }

    fn play(&mut self) {
        let _ = self.send(DecoderCommand::Play);
    }

    fn pause(&mut self) {
        let _ = self.send(DecoderCommand::Pause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::audio::AudioCommand;
    use tokio::sync::mpsc;

    fn remote() -> (RemoteVideo, mpsc::UnboundedReceiver<DecoderCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (RemoteVideo::new(DecoderCommandSender::new(tx)), rx)
    }

    fn remote_with_audio() -> (
        RemoteVideo,
        mpsc::UnboundedReceiver<DecoderCommand>,
        mpsc::UnboundedReceiver<AudioCommand>,
    ) {
        let (video_tx, video_rx) = mpsc::unbounded_channel();
        let (audio_tx, audio_rx) = mpsc::unbounded_channel();
        let sender = DecoderCommandSender::new(video_tx).with_audio(audio_tx);
        (RemoteVideo::new(sender), video_rx, audio_rx)
    }

    #[test]
    fn duration_unknown_until_metadata() {
        let (mut video, _rx) = remote();
        assert_eq!(video.duration(), None);

        video.set_metadata(VideoMetadata {
            width: 640,
            height: 360,
            duration_secs: Some(596.5),
        });
        assert_eq!(video.duration(), Some(596.5));
    }

    #[test]
    fn play_pause_and_rate_become_commands() {
        let (mut video, mut rx) = remote();
        video.play();
        video.set_playback_rate(2.0);
        video.pause();

        assert_eq!(rx.try_recv().unwrap(), DecoderCommand::Play);
        assert_eq!(rx.try_recv().unwrap(), DecoderCommand::SetRate(2.0));
        assert_eq!(rx.try_recv().unwrap(), DecoderCommand::Pause);
        assert_eq!(video.playback_rate(), 2.0);
    }

    #[test]
    fn seek_moves_position_immediately() {
        let (mut video, mut rx) = remote();
        video.set_current_time(60.0);

        assert_eq!(video.current_time(), 60.0);
        assert_eq!(
            rx.try_recv().unwrap(),
            DecoderCommand::Seek { target_secs: 60.0 }
        );
    }

    #[test]
    fn frames_update_position() {
        let (mut video, _rx) = remote();
        video.observe_frame(12.25);
        assert_eq!(video.current_time(), 12.25);

        video.observe_frame(f64::NAN);
        assert_eq!(video.current_time(), 12.25);
    }

    #[test]
    fn volume_is_stored() {
        let (mut video, _rx) = remote();
        video.set_volume(0.3);
        assert_eq!(video.volume(), 0.3);
    }

    #[test]
    fn volume_goes_to_audio_only() {
        let (mut video, mut video_rx, mut audio_rx) = remote_with_audio();
        video.set_volume(0.0);

        assert_eq!(audio_rx.try_recv().unwrap(), AudioCommand::SetVolume(0.0));
        assert!(video_rx.try_recv().is_err());
    }

    #[test]
    fn frames_queued_before_seek_ack_are_rejected() {
        let (mut video, _rx) = remote();
        video.observe_frame(10.0);

        video.set_current_time(60.0);
        assert!(!video.observe_frame(10.04));
        assert_eq!(video.current_time(), 60.0);

        video.seek_completed();
        assert!(video.observe_frame(60.0));
        assert_eq!(video.current_time(), 60.0);
    }

    #[test]
    fn every_outstanding_seek_must_complete() {
        let (mut video, _rx) = remote();
        video.set_current_time(30.0);
        video.set_current_time(45.0);

        video.seek_completed();
        assert!(!video.observe_frame(30.0));
        video.seek_completed();
        assert!(video.observe_frame(45.0));
        // A stray acknowledgement does not underflow
        video.seek_completed();
        assert!(video.observe_frame(45.04));
    }

    #[test]
    fn seek_to_stopped_decoder_does_not_block_frames() {
        let (mut video, rx) = remote();
        drop(rx);
        video.set_current_time(20.0);
        assert!(video.observe_frame(0.0));
    }

    #[test]
    fn commands_to_stopped_decoder_are_absorbed() {
        let (mut video, rx) = remote();
        drop(rx);
        video.play();
        video.set_current_time(5.0);
        assert_eq!(video.current_time(), 5.0);
    }
}
