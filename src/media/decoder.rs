// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! The decoder opens the source (local path or network URL) on a Tokio
//! blocking thread and delivers paced RGBA frames through a bounded channel.

use super::audio::AudioCommand;
use super::video::{duration_from_av, init_ffmpeg, VideoMetadata};
use crate::error::{MediaError, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Frames this close before a seek target count as reaching it.
const SEEK_TOLERANCE_SECS: f64 = 0.02;

/// Upper bound on frames skipped while seeking to an exact position.
const MAX_SEEK_FRAMES: u32 = 1000;

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    /// Start or resume decoding from the current position.
    Play,

    /// Pause decoding (stop sending frames).
    Pause,

    /// Seek to a specific timestamp.
    Seek { target_secs: f64 },

    /// Change the pacing rate (1.0 = real time).
    SetRate(f64),

    /// Stop decoding and clean up resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The source is open; dimensions and duration are known.
    MetadataLoaded(VideoMetadata),

    /// A new frame is ready for display.
    FrameReady(DecodedFrame),

    /// Decoder is buffering after a play or seek.
    Buffering,

    /// A seek was carried out; frames sent from now on are at or after the target.
    Seeked { target_secs: f64 },

    /// Decoding reached the end of the stream.
    EndOfStream,

    /// An error occurred during decoding.
    Error(String),
}

/// Cloneable handle for sending commands to a running decoder.
///
/// Playback commands go to the video decoder and, when the source has an
/// audio pipeline, to the audio decoder as well. Volume only concerns audio.
#[derive(Clone)]
pub struct DecoderCommandSender {
    video_tx: mpsc::UnboundedSender<DecoderCommand>,
    audio_tx: Option<mpsc::UnboundedSender<AudioCommand>>,
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("has_audio", &self.has_audio())
            .finish()
    }
}

impl DecoderCommandSender {
    pub(crate) fn new(video_tx: mpsc::UnboundedSender<DecoderCommand>) -> Self {
        Self {
            video_tx,
            audio_tx: None,
        }
    }

    /// Routes playback and volume commands to an audio pipeline too.
    pub(crate) fn with_audio(mut self, audio_tx: mpsc::UnboundedSender<AudioCommand>) -> Self {
        self.audio_tx = Some(audio_tx);
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio_tx.is_some()
    }

    /// Sends a command; fails only if the video decoder task has exited.
    pub fn send(&self, command: DecoderCommand) -> Result<()> {
        if let Some(audio_tx) = &self.audio_tx {
            // Audio may end early (no track, no device); video keeps going
            if audio_tx.send(AudioCommand::from(&command)).is_err() {
                log::debug!("Audio pipeline gone, {:?} sent to video only", command);
            }
        }
        self.video_tx
            .send(command)
            .map_err(|_| MediaError::Other("Decoder task is not running".into()).into())
    }

    /// Sets the audio volume fraction. A source without audio accepts it silently.
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let Some(audio_tx) = &self.audio_tx else {
            return Ok(());
        };
        audio_tx
            .send(AudioCommand::SetVolume(volume))
            .map_err(|_| MediaError::Other("Audio pipeline is not running".into()).into())
    }
}

/// Playback bookkeeping of the video loop.
#[derive(Debug)]
struct VideoLoopState {
    is_playing: bool,
    rate: f64,
    /// Pacing anchor: wall clock and PTS of the first frame since (re)start.
    playback_start_time: Option<Instant>,
    first_pts: Option<f64>,
    /// Decode one frame while paused so a seek shows its result.
    decode_single_frame: bool,
    /// Frames before this position are decoded but not shown.
    seek_target: Option<f64>,
    seek_frames_skipped: u32,
    /// Packets are exhausted and the decoder is being drained.
    flushing: bool,
    /// Every frame was delivered; the next play restarts from the beginning.
    at_eof: bool,
}

impl VideoLoopState {
    fn new() -> Self {
        Self {
            is_playing: false,
            rate: 1.0,
            playback_start_time: None,
            first_pts: None,
            decode_single_frame: false,
            seek_target: None,
            seek_frames_skipped: 0,
            flushing: false,
            at_eof: false,
        }
    }

    fn reset_timing(&mut self) {
        self.playback_start_time = self.is_playing.then(Instant::now);
        self.first_pts = None;
    }

    /// Starts playing. Returns `true` when the stream must be rewound first.
    fn play(&mut self) -> bool {
        let rewind = self.at_eof;
        if rewind {
            self.flushing = false;
            self.at_eof = false;
        }
        self.is_playing = true;
        self.reset_timing();
        rewind
    }

    fn pause(&mut self) {
        self.is_playing = false;
        self.reset_timing();
    }

    fn seeked(&mut self, target_secs: f64) {
        self.flushing = false;
        self.at_eof = false;
        self.seek_target = Some(target_secs);
        self.seek_frames_skipped = 0;
        self.decode_single_frame = !self.is_playing;
        self.reset_timing();
    }

    fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
            // Re-anchor so already elapsed time is not rescaled
            self.reset_timing();
        }
    }

    fn ended(&mut self) {
        self.at_eof = true;
        self.is_playing = false;
        self.decode_single_frame = false;
        self.seek_target = None;
        self.reset_timing();
    }

    fn wants_frame(&self) -> bool {
        !self.at_eof && (self.is_playing || self.decode_single_frame)
    }

    /// Returns `false` for frames still before the seek target.
    fn reached_seek_target(&mut self, pts_secs: f64) -> bool {
        let Some(target) = self.seek_target else {
            return true;
        };
        if pts_secs + SEEK_TOLERANCE_SECS >= target || self.seek_frames_skipped >= MAX_SEEK_FRAMES {
            self.seek_target = None;
            return true;
        }
        self.seek_frames_skipped += 1;
        false
    }

    /// Time to wait before presenting the frame at `pts_secs`, if any.
    fn presentation_delay(&mut self, pts_secs: f64) -> Option<Duration> {
        let start_time = self.playback_start_time?;
        let first = *self.first_pts.get_or_insert(pts_secs);
        let frame_delay = ((pts_secs - first) / self.rate).max(0.0);
        let target_time = start_time + Duration::from_secs_f64(frame_delay);
        target_time
            .checked_duration_since(Instant::now())
            .filter(|delay| !delay.is_zero())
    }
}

/// Async video decoder that runs in a Tokio blocking task.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,

    /// Bounded to provide backpressure while the UI is busy.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns a decoder for `source`.
    ///
    /// Opening happens on the decoder thread; failures arrive as
    /// [`DecoderEvent::Error`].
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();

        // Commands: unbounded so the UI never blocks
        // Events: capacity of 2 frames keeps memory flat during seeks
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg types are not Send, so the whole loop lives on one blocking thread
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(&source, command_rx, event_tx) {
                log::error!("Decoder task for {} failed: {}", source, e);
            }
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    /// Returns a handle that can outlive this decoder's event receiver.
    pub fn command_sender(&self) -> DecoderCommandSender {
        DecoderCommandSender::new(self.command_tx.clone())
    }

    /// Sends a command to the decoder task.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_sender().send(command)
    }

    /// Receives the next event, or `None` once the decoder task has terminated.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    /// Next decoded frame of the video stream; drains the decoder once packets run out.
    fn next_frame(
        ictx: &mut ffmpeg_next::format::context::Input,
        decoder: &mut ffmpeg_next::decoder::Video,
        stream_index: usize,
        flushing: &mut bool,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Option<ffmpeg_next::frame::Video> {
        let mut frame = ffmpeg_next::frame::Video::empty();
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
                let _ = event_tx.blocking_send(DecoderEvent::Error(format!(
                    "Packet send failed: {}",
                    e
                )));
                continue;
            }
            if decoder.receive_frame(&mut frame).is_ok() {
                return Some(frame);
            }
        }

        // Frames held back for reordering only come out after end of input
        *flushing = true;
        let _ = decoder.send_eof();
        decoder.receive_frame(&mut frame).ok().map(|()| frame)
    }

    fn decoder_loop_blocking(
        source: &str,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        let fail = |message: String| {
            let _ = event_tx.blocking_send(DecoderEvent::Error(message.clone()));
            MediaError::from_message(&message)
        };

        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&source)
            .map_err(|e| fail(format!("Failed to open {}: {}", source, e)))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| fail("No video stream found".to_string()))?;
        let video_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| fail(format!("Failed to create codec context: {}", e)))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| fail(format!("Failed to create video decoder: {}", e)))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| fail(format!("Failed to create scaler: {}", e)))?;

        let metadata = VideoMetadata {
            width,
            height,
            duration_secs: duration_from_av(ictx.duration()),
        };
        log::info!(
            "Opened {} ({}x{}, duration {:?})",
            source,
            width,
            height,
            metadata.duration_secs
        );
        if event_tx
            .blocking_send(DecoderEvent::MetadataLoaded(metadata))
            .is_err()
        {
            return Ok(());
        }

        let mut state = VideoLoopState::new();

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if state.play() {
                        log::debug!("Restarting {} from the beginning", source);
                        if let Err(e) = ictx.seek(0, ..0) {
                            let _ = event_tx
                                .blocking_send(DecoderEvent::Error(format!("Seek failed: {}", e)));
                        }
                        decoder.flush();
                    }
                    let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                }
                Ok(DecoderCommand::Pause) => state.pause(),
                Ok(DecoderCommand::Seek { target_secs }) => {
                    let target_secs = target_secs.max(0.0);
                    // Container seek uses AV_TIME_BASE (microseconds)
                    let timestamp = (target_secs * 1_000_000.0) as i64;
                    // RangeTo lets FFmpeg land on the preceding keyframe
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        let _ = event_tx
                            .blocking_send(DecoderEvent::Error(format!("Seek failed: {}", e)));
                    } else {
                        decoder.flush();
                        state.seeked(target_secs);
                        let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                    }
                    // Acknowledged even on failure so nothing waits on it forever
                    let _ = event_tx.blocking_send(DecoderEvent::Seeked { target_secs });
                }
                Ok(DecoderCommand::SetRate(rate)) => state.set_rate(rate),
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    log::debug!("Decoder for {} stopping", source);
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !state.wants_frame() {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let Some(decoded_frame) = Self::next_frame(
                &mut ictx,
                &mut decoder,
                video_stream_index,
                &mut state.flushing,
                &event_tx,
            ) else {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                state.ended();
                continue;
            };

            let pts_secs = decoded_frame
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * time_base_f64);

            if !state.reached_seek_target(pts_secs) {
                continue;
            }

            let mut rgb_frame = ffmpeg_next::frame::Video::empty();
            if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                let _ = event_tx.blocking_send(DecoderEvent::Error(format!("Scaling failed: {}", e)));
                continue;
            }

            if let Some(delay) = state.presentation_delay(pts_secs) {
                std::thread::sleep(delay);
            }

            let decoded = DecodedFrame {
                rgba_data: Arc::new(Self::extract_rgba_data(&rgb_frame)),
                width,
                height,
                pts_secs,
            };

            if event_tx
                .blocking_send(DecoderEvent::FrameReady(decoded))
                .is_err()
            {
                return Ok(());
            }

            state.decode_single_frame = false;
        }

        Ok(())
    }

    /// Extracts RGBA data from a decoded frame, handling stride correctly.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

impl Drop for AsyncDecoder {
    /// Command handles may outlive the decoder (the UI keeps one), so the
    /// channel alone would not end the decoding thread.
    fn drop(&mut self) {
        let _ = self.command_tx.send(DecoderCommand::Stop);
    }
}
