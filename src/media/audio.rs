// SPDX-License-Identifier: MPL-2.0
//! Audio track decoding.
//!
//! The audio decoder opens its own connection to the source, resamples the
//! best audio stream to the output device format and paces buffers against
//! the wall clock. It receives the same playback commands as the video
//! decoder, so both tracks follow the player together.

use super::audio_output::{AudioOutputConfig, AudioSamples};
use super::decoder::DecoderCommand;
use super::video::init_ffmpeg;
use crate::error::{MediaError, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Audio is queued this far ahead of its presentation time.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

/// Upper bound on buffers skipped while seeking to an exact position.
const MAX_SEEK_BUFFERS: u32 = 1000;

/// Commands understood by the audio pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Play,
    Pause,
    Seek { target_secs: f64 },
    SetRate(f64),
    /// Volume fraction (0.0–1.0); 0 is silence.
    SetVolume(f32),
    Stop,
}

impl From<&DecoderCommand> for AudioCommand {
    fn from(command: &DecoderCommand) -> Self {
        match command {
            DecoderCommand::Play => AudioCommand::Play,
            DecoderCommand::Pause => AudioCommand::Pause,
            DecoderCommand::Seek { target_secs } => AudioCommand::Seek {
                target_secs: *target_secs,
            },
            DecoderCommand::SetRate(rate) => AudioCommand::SetRate(*rate),
            DecoderCommand::Stop => AudioCommand::Stop,
        }
    }
}

/// A resampled buffer ready for the output device.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: AudioSamples,
    pub pts_secs: f64,
}

#[derive(Debug, Clone)]
pub enum AudioEvent {
    BufferReady(DecodedAudio),
    EndOfStream,
    Error(String),
}

/// Playback bookkeeping of the audio loop.
#[derive(Debug)]
struct AudioLoopState {
    is_playing: bool,
    rate: f64,
    playback_start_time: Option<Instant>,
    first_pts: Option<f64>,
    seek_target_secs: Option<f64>,
    seek_buffers_skipped: u32,
    /// Packets are exhausted and the decoder is being drained.
    flushing: bool,
    /// Everything was delivered; the next play restarts from the beginning.
    at_eof: bool,
}

impl AudioLoopState {
    fn new() -> Self {
        Self {
            is_playing: false,
            rate: 1.0,
            playback_start_time: None,
            first_pts: None,
            seek_target_secs: None,
            seek_buffers_skipped: 0,
            flushing: false,
            at_eof: false,
        }
    }

    fn reset_timing(&mut self) {
        self.playback_start_time = self.is_playing.then(Instant::now);
        self.first_pts = None;
    }

    /// Only normal speed is rendered; faster playback would need time stretching.
    fn audible(&self) -> bool {
        (self.rate - 1.0).abs() < f64::EPSILON
    }

    /// Returns `false` while `pts_secs + duration` is still before the seek target.
    fn reached_seek_target(&mut self, pts_secs: f64, duration_secs: f64) -> bool {
        let Some(target) = self.seek_target_secs else {
            return true;
        };
        if pts_secs + duration_secs >= target || self.seek_buffers_skipped >= MAX_SEEK_BUFFERS {
            self.seek_target_secs = None;
            return true;
        }
        self.seek_buffers_skipped += 1;
        false
    }
}

/// Audio decoder running on a Tokio blocking thread.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<AudioCommand>,
    event_rx: mpsc::Receiver<AudioEvent>,
}

impl AudioDecoder {
    /// Spawns an audio decoder for `source`, resampling to `output`.
    ///
    /// A source without an audio track ends the task quietly; the event
    /// stream then closes without an error.
    pub fn new(source: impl Into<String>, output: AudioOutputConfig) -> Self {
        let source = source.into();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop(&source, output, command_rx, event_tx) {
                log::warn!("Audio decoder for {} failed: {}", source, e);
            }
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    pub fn send_command(&self, command: AudioCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| MediaError::Other("Audio decoder task is not running".into()).into())
    }

    pub async fn recv_event(&mut self) -> Option<AudioEvent> {
        self.event_rx.recv().await
    }

    #[allow(clippy::too_many_lines)]
    fn decoder_loop(
        source: &str,
        output: AudioOutputConfig,
        mut command_rx: mpsc::UnboundedReceiver<AudioCommand>,
        event_tx: mpsc::Sender<AudioEvent>,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&source)
            .map_err(|e| MediaError::SourceUnavailable(format!("Failed to open {source}: {e}")))?;

        let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
            log::info!("{} has no audio track", source);
            return Ok(());
        };
        let audio_stream_index = input.index();
        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| MediaError::DecodingFailed(format!("Audio codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .audio()
            .map_err(|e| MediaError::DecodingFailed(format!("Audio decoder: {e}")))?;

        let output_layout = match output.channels {
            1 => ffmpeg_next::ChannelLayout::MONO,
            // Anything wider is downmixed to stereo
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let output_channels = output_layout.channels() as u16;
        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_layout,
            output.sample_rate,
        )
        .map_err(|e| MediaError::DecodingFailed(format!("Failed to create resampler: {e}")))?;

        let mut state = AudioLoopState::new();

        loop {
            match command_rx.try_recv() {
                Ok(AudioCommand::Play) => {
                    if state.at_eof {
                        // Replay from the start
                        if let Err(e) = ictx.seek(0, ..0) {
                            let _ = event_tx
                                .blocking_send(AudioEvent::Error(format!("Audio seek failed: {e}")));
                        }
                        decoder.flush();
                        state.flushing = false;
                        state.at_eof = false;
                    }
                    state.is_playing = true;
                    state.reset_timing();
                }
                Ok(AudioCommand::Pause) => {
                    state.is_playing = false;
                    state.reset_timing();
                }
                Ok(AudioCommand::Seek { target_secs }) => {
                    let timestamp = (target_secs.max(0.0) * 1_000_000.0) as i64;
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        let _ = event_tx
                            .blocking_send(AudioEvent::Error(format!("Audio seek failed: {e}")));
                    } else {
                        decoder.flush();
                        state.flushing = false;
                        state.at_eof = false;
                        state.seek_target_secs = Some(target_secs);
                        state.seek_buffers_skipped = 0;
                        state.reset_timing();
                    }
                }
                Ok(AudioCommand::SetRate(rate)) => {
                    if rate.is_finite() && rate > 0.0 {
                        state.rate = rate;
                        state.reset_timing();
                    }
                }
                // Volume is applied by the output device
                Ok(AudioCommand::SetVolume(_)) => {}
                Ok(AudioCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !state.is_playing || state.at_eof {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let Some(decoded) =
                Self::next_frame(&mut ictx, &mut decoder, audio_stream_index, &mut state.flushing)
            else {
                let _ = event_tx.blocking_send(AudioEvent::EndOfStream);
                state.at_eof = true;
                continue;
            };

            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = resampler.run(&decoded, &mut resampled) {
                let _ = event_tx.blocking_send(AudioEvent::Error(format!("Resampling failed: {e}")));
                continue;
            }

            let samples = Self::extract_samples(&resampled, output_channels);
            let pts_secs = decoded
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * time_base_f64);
            let duration_secs = samples.len() as f64
                / (f64::from(output.sample_rate) * f64::from(output_channels));

            if !state.reached_seek_target(pts_secs, duration_secs) {
                continue;
            }

            if let Some(start_time) = state.playback_start_time {
                let first = *state.first_pts.get_or_insert(pts_secs);
                let delay = (pts_secs - first) / state.rate - AUDIO_LOOKAHEAD_SECS;
                if delay > 0.0 {
                    let target_time = start_time + Duration::from_secs_f64(delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }
            }

            if !state.audible() {
                continue;
            }

            let buffer = DecodedAudio {
                samples: Arc::new(samples),
                pts_secs,
            };
            if event_tx.blocking_send(AudioEvent::BufferReady(buffer)).is_err() {
                break;
            }
        }

        Ok(())
    }

    /// Next decoded frame of the audio stream; drains the decoder once packets run out.
    fn next_frame(
        ictx: &mut ffmpeg_next::format::context::Input,
        decoder: &mut ffmpeg_next::decoder::Audio,
        stream_index: usize,
        flushing: &mut bool,
    ) -> Option<ffmpeg_next::frame::Audio> {
        let mut frame = ffmpeg_next::frame::Audio::empty();
        if decoder.receive_frame(&mut frame).is_ok() {
            return Some(frame);
        }
        if *flushing {
            return None;
        }

        for (stream, packet) in ictx.packets() {
            if stream.index() != stream_index {
                continue;
            }
            if let Err(e) = decoder.send_packet(&packet) {
                log::debug!("Audio packet rejected: {}", e);
                continue;
            }
            if decoder.receive_frame(&mut frame).is_ok() {
                return Some(frame);
            }
        }

        *flushing = true;
        let _ = decoder.send_eof();
        decoder.receive_frame(&mut frame).ok().map(|()| frame)
    }

    /// Reads packed f32 samples out of a resampled frame.
    fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
        let data = frame.data(0);
        let sample_count = frame.samples() * usize::from(channels);
        data.chunks_exact(4)
            .take(sample_count)
            .map(|bytes| f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            .collect()
    }
}

impl Drop for AudioDecoder {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Stop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_commands_map_to_audio_commands() {
        assert_eq!(AudioCommand::from(&DecoderCommand::Play), AudioCommand::Play);
        assert_eq!(
            AudioCommand::from(&DecoderCommand::Seek { target_secs: 12.5 }),
            AudioCommand::Seek { target_secs: 12.5 }
        );
        assert_eq!(
            AudioCommand::from(&DecoderCommand::SetRate(2.0)),
            AudioCommand::SetRate(2.0)
        );
        assert_eq!(AudioCommand::from(&DecoderCommand::Stop), AudioCommand::Stop);
    }

    #[test]
    fn only_normal_speed_is_audible() {
        let mut state = AudioLoopState::new();
        assert!(state.audible());
        state.rate = 2.0;
        assert!(!state.audible());
    }

    #[test]
    fn buffers_before_seek_target_are_skipped() {
        let mut state = AudioLoopState::new();
        state.seek_target_secs = Some(10.0);

        assert!(!state.reached_seek_target(9.0, 0.5));
        assert!(state.reached_seek_target(9.8, 0.5));
        assert_eq!(state.seek_target_secs, None);
        assert!(state.reached_seek_target(3.0, 0.5));
    }

    #[test]
    fn seek_skipping_gives_up_eventually() {
        let mut state = AudioLoopState::new();
        state.seek_target_secs = Some(1.0e9);
        let skipped = (0..=MAX_SEEK_BUFFERS)
            .take_while(|_| !state.reached_seek_target(0.0, 0.02))
            .count();
        assert_eq!(skipped, MAX_SEEK_BUFFERS as usize);
    }

    #[test]
    fn dropping_decoder_sends_stop() {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let (_event_tx, event_rx) = mpsc::channel(1);
        drop(AudioDecoder {
            command_tx,
            event_rx,
        });
        assert_eq!(command_rx.try_recv().ok(), Some(AudioCommand::Stop));
    }

    #[tokio::test]
    async fn missing_source_closes_event_stream() {
        let config = AudioOutputConfig {
            sample_rate: 48_000,
            channels: 2,
        };
        let mut decoder = AudioDecoder::new("/nonexistent/video.mp4", config);
        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("audio decoder answered in time");
        assert!(event.is_none());
    }
}
