// SPDX-License-Identifier: MPL-2.0
//! Media playback backend.
//!
//! The player only sees the [`MediaElement`] port. [`RemoteVideo`] implements
//! it on top of an FFmpeg decoder running on a Tokio blocking thread, fed to
//! the UI through the [`media_playback`] subscription. The audio track is
//! decoded separately and played through cpal when an output device exists.

mod audio;
mod audio_output;
mod decoder;
mod element;
mod remote;
pub mod subscription;
pub mod video;

pub use audio::AudioCommand;
pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderCommandSender, DecoderEvent};
pub use element::MediaElement;
pub use remote::RemoteVideo;
pub use subscription::{media_playback, PlaybackMessage};
pub use video::VideoMetadata;
