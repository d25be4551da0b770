// SPDX-License-Identifier: MPL-2.0
//! Audio output through the system's default device (cpal).
//!
//! Decoded samples are queued into a bounded buffer drained by the device
//! callback. Volume and pause state live in atomics shared with the
//! callback, so a volume change is heard on the next callback instead of
//! after the queued samples.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Sample rate and channel count the decoder must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug)]
enum OutputCommand {
    Queue(AudioSamples),
    Pause,
    Resume,
    /// Clear the buffer and pause.
    Stop,
    /// Clear the buffer, keep the pause state.
    ClearBuffer,
    SetVolume(f32),
}

/// State read by the device callback on every buffer request.
struct SharedState {
    /// f32 bits of the volume fraction.
    volume_bits: AtomicU32,
    paused: AtomicBool,
}

impl SharedState {
    fn new(initial_volume: f32) -> Self {
        Self {
            volume_bits: AtomicU32::new(initial_volume.clamp(0.0, 1.0).to_bits()),
            // Nothing plays until the player asks for it
            paused: AtomicBool::new(true),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Gain applied to samples: quadratic so the slider feels linear to the ear.
    fn gain(&self) -> f32 {
        let volume = self.volume();
        volume * volume
    }
}

/// Appends as many samples as fit under `max_len`; the rest is dropped.
fn queue_bounded(buffer: &mut Vec<f32>, samples: &[f32], max_len: usize) {
    let room = max_len.saturating_sub(buffer.len());
    let take = room.min(samples.len());
    buffer.extend_from_slice(&samples[..take]);
}

/// Fills `data` from the front of `buffer`, scaled by `gain`, padding with silence.
fn fill_output<T: cpal::Sample + cpal::FromSample<f32>>(
    data: &mut [T],
    buffer: &mut Vec<f32>,
    gain: f32,
) {
    for (i, sample) in data.iter_mut().enumerate() {
        let value = buffer
            .get(i)
            // Just below 1.0: from_sample overflows i16 at exactly 1.0
            .map_or(0.0, |s| (s * gain).clamp(-1.0, 0.999_999_9));
        *sample = T::from_sample(value);
    }
    let consumed = data.len().min(buffer.len());
    buffer.drain(..consumed);
}

/// Playback stream on the default output device.
pub struct AudioOutput {
    command_tx: mpsc::UnboundedSender<OutputCommand>,
    shared_state: Arc<SharedState>,
    config: AudioOutputConfig,
    /// Kept alive for the lifetime of the output.
    _stream: cpal::Stream,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("config", &self.config)
            .field("volume", &self.shared_state.volume())
            .finish()
    }
}

impl AudioOutput {
    /// Opens the default output device, paused, at `initial_volume`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails when there is no output device, its configuration cannot be
    /// read, its sample format is unsupported, or the stream cannot start.
    pub fn new(initial_volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate(),
            channels: supported_config.channels(),
        };

        let shared_state = Arc::new(SharedState::new(initial_volume));
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<OutputCommand>();

        // One second of audio at most; a slow consumer drops samples instead of growing
        let max_buffer_len = config.sample_rate as usize * usize::from(config.channels);
        let buffer = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_len)));

        let buffer_for_task = Arc::clone(&buffer);
        let shared_for_task = Arc::clone(&shared_state);
        tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                match command {
                    OutputCommand::Queue(samples) => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            queue_bounded(&mut buf, &samples, max_buffer_len);
                        }
                    }
                    OutputCommand::Pause => shared_for_task.set_paused(true),
                    OutputCommand::Resume => shared_for_task.set_paused(false),
                    OutputCommand::Stop => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                        shared_for_task.set_paused(true);
                    }
                    OutputCommand::ClearBuffer => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                    }
                    OutputCommand::SetVolume(volume) => shared_for_task.set_volume(volume),
                }
            }
        });

        let stream_config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(Error::Io(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        log::info!(
            "Audio output opened ({} Hz, {} channels)",
            config.sample_rate,
            config.channels
        );

        Ok(Self {
            command_tx,
            shared_state,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let silent = shared_state.is_paused();
                    match buffer.lock() {
                        Ok(mut buf) if !silent => fill_output(data, &mut buf, shared_state.gain()),
                        // Paused, or the buffer mutex is poisoned
                        _ => data
                            .iter_mut()
                            .for_each(|sample| *sample = T::from_sample(0.0f32)),
                    }
                },
                |err| log::warn!("Audio output error: {err}"),
                None,
            )
            .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
    }

    /// Device format decoded audio must be converted to.
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    fn send(&self, command: OutputCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Audio output channel closed".into()))
    }

    /// Queues samples for playback.
    pub fn queue(&self, samples: AudioSamples) -> Result<()> {
        self.send(OutputCommand::Queue(samples))
    }

    pub fn pause(&self) -> Result<()> {
        self.send(OutputCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(OutputCommand::Resume)
    }

    /// Pauses and discards queued samples.
    pub fn stop(&self) -> Result<()> {
        self.send(OutputCommand::Stop)
    }

    /// Discards queued samples, e.g. after a seek.
    pub fn clear_buffer(&self) -> Result<()> {
        self.send(OutputCommand::ClearBuffer)
    }

    /// Sets the volume fraction (0.0–1.0, clamped).
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.send(OutputCommand::SetVolume(volume))
    }
}
