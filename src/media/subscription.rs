// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for media playback events.
//!
//! Connects the async decoder to the UI event loop. The first message is
//! always [`PlaybackMessage::Started`], carrying the command handle the UI
//! wraps into a [`RemoteVideo`](super::RemoteVideo).
//!
//! Audio is optional: when an output device opens, an audio decoder runs
//! next to the video decoder and this task feeds its buffers to the device.
//! Without a device (or an audio track) the video plays silently.

use super::audio::{AudioCommand, AudioDecoder, AudioEvent};
use super::audio_output::AudioOutput;
use super::decoder::{AsyncDecoder, DecoderCommandSender, DecoderEvent};
use super::video::VideoMetadata;
use crate::config::DEFAULT_VOLUME;
use crate::error::Result;
use iced::futures::SinkExt;
use iced::stream;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Subscription ID for media playback.
/// A new session ID recreates the subscription (and the decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaPlaybackId(u64);

/// Messages emitted by the media playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Decoder spawned; commands can be sent from now on.
    Started(DecoderCommandSender),

    /// Source metadata is available.
    MetadataLoaded(VideoMetadata),

    /// A new frame is ready for display.
    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        pts_secs: f64,
    },

    /// Decoder is buffering.
    Buffering,

    /// A seek completed; later frames belong to the new position.
    Seeked { target_secs: f64 },

    /// Decoding reached the end of the stream.
    EndOfStream,

    /// An error occurred.
    Error(String),
}

impl From<DecoderEvent> for PlaybackMessage {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::MetadataLoaded(metadata) => PlaybackMessage::MetadataLoaded(metadata),
            DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
                rgba_data: frame.rgba_data,
                width: frame.width,
                height: frame.height,
                pts_secs: frame.pts_secs,
            },
            DecoderEvent::Buffering => PlaybackMessage::Buffering,
            DecoderEvent::Seeked { target_secs } => PlaybackMessage::Seeked { target_secs },
            DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
            DecoderEvent::Error(message) => PlaybackMessage::Error(message),
        }
    }
}

/// Applies an audio command to the output device and the audio decoder.
fn route_audio_command(
    command: AudioCommand,
    output: &AudioOutput,
    decoder: Option<&AudioDecoder>,
) -> Result<()> {
    match &command {
        AudioCommand::Play => output.resume()?,
        AudioCommand::Pause => output.pause()?,
        AudioCommand::Seek { .. } => output.clear_buffer()?,
        AudioCommand::SetRate(_) => output.clear_buffer()?,
        AudioCommand::SetVolume(volume) => return output.set_volume(*volume),
        AudioCommand::Stop => output.stop()?,
    }
    match decoder {
        Some(decoder) => decoder.send_command(command),
        None => Ok(()),
    }
}

/// Opens the output device and an audio decoder matched to it.
fn start_audio(source: &str) -> Option<(AudioOutput, AudioDecoder)> {
    match AudioOutput::new(DEFAULT_VOLUME) {
        Ok(output) => {
            let decoder = AudioDecoder::new(source, output.config());
            Some((output, decoder))
        }
        Err(e) => {
            log::warn!("Playing without sound: {}", e);
            None
        }
    }
}

/// Creates the playback subscription for `source`.
///
/// The stream ends when the video decoder task terminates (open failure or
/// stop). Dropping the subscription stops both decoders.
pub fn media_playback(source: String, session_id: u64) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with_id(
        MediaPlaybackId(session_id),
        stream::channel(100, move |mut output| async move {
            let mut decoder = AsyncDecoder::new(source.clone());
            let (audio_tx, mut audio_rx) = mpsc::unbounded_channel::<AudioCommand>();

            let (audio_output, mut audio_decoder) = match start_audio(&source) {
                Some((out, dec)) => (Some(out), Some(dec)),
                None => (None, None),
            };

            let mut commands = decoder.command_sender();
            if audio_output.is_some() {
                commands = commands.with_audio(audio_tx);
            }

            if output
                .send(PlaybackMessage::Started(commands))
                .await
                .is_err()
            {
                return;
            }

            loop {
                tokio::select! {
                    event = decoder.recv_event() => {
                        let Some(event) = event else {
                            break;
                        };
                        if output.send(PlaybackMessage::from(event)).await.is_err() {
                            break;
                        }
                    }

                    Some(command) = audio_rx.recv(), if audio_output.is_some() => {
                        if let Some(out) = &audio_output {
                            if let Err(e) = route_audio_command(command, out, audio_decoder.as_ref()) {
                                log::debug!("Audio command dropped: {}", e);
                            }
                        }
                    }

                    audio_event = async {
                        match audio_decoder.as_mut() {
                            Some(dec) => dec.recv_event().await,
                            None => std::future::pending::<Option<AudioEvent>>().await,
                        }
                    } => {
                        match audio_event {
                            Some(AudioEvent::BufferReady(buffer)) => {
                                if let Some(out) = &audio_output {
                                    log::trace!("Queueing audio at {:.3}s", buffer.pts_secs);
                                    let _ = out.queue(buffer.samples);
                                }
                            }
                            Some(AudioEvent::EndOfStream) => log::debug!("Audio track finished"),
                            Some(AudioEvent::Error(message)) => {
                                log::warn!("Audio error: {}", message);
                            }
                            None => {
                                // No audio track, or the audio task failed
                                audio_decoder = None;
                            }
                        }
                    }
                }
            }

            log::debug!("Playback session {} ended", session_id);
        }),
    )
}
