// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::PlaybackMessage;
use crate::player;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Control bar interaction.
    Player(player::Message),
    /// Event from the media playback subscription.
    Playback(PlaybackMessage),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `pt-BR`).
    pub lang: Option<String>,
    /// Media source URL overriding the configured one.
    pub source_url: Option<String>,
}
