// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the player, the media
//! backend and localization.
//!
//! The `App` owns the [`Player`] bound to a [`RemoteVideo`], feeds playback
//! subscription events into it, and lays the page out: player on top,
//! description and related videos below (hidden in fullscreen).

mod message;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::MediaError;
use crate::i18n::fluent::I18n;
use crate::media::{self, MediaElement, PlaybackMessage, RemoteVideo};
use crate::player::{self, Player};
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::player::{PlayerLayout, Surface, ViewContext};
use crate::ui::theming::ThemeMode;
use crate::ui::{description, list_videos};
use iced::widget::{column, container, image, scrollable};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 900.0;
pub const MIN_WINDOW_WIDTH: f32 = 640.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Identifies the one playback session of the application run.
const PLAYBACK_SESSION: u64 = 0;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    source_url: String,
    player: Player<RemoteVideo>,
    /// Last decoded frame, shown on the video surface.
    frame: Option<image::Handle>,
    /// Set when the decoder reported an error.
    media_error: Option<MediaError>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("source_url", &self.source_url)
            .field("state", self.player.state())
            .field("has_frame", &self.frame.is_some())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires an Fn boot closure; flags are cloned per call
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load();
        (Self::with_config(flags, &config), Task::none())
    }

    /// Builds the initial state from CLI flags layered over `config`.
    pub fn with_config(flags: Flags, config: &Config) -> Self {
        let i18n = I18n::new(flags.lang, config);
        let source_url = flags
            .source_url
            .unwrap_or_else(|| config.player.source_url.clone());

        log::info!(
            "Starting with locale {} and source {}",
            i18n.current_locale(),
            source_url
        );

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            source_url,
            player: Player::new(),
            frame: None,
            media_error: None,
        }
    }

    pub fn player(&self) -> &Player<RemoteVideo> {
        &self.player
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn media_error(&self) -> Option<&MediaError> {
        self.media_error.as_ref()
    }

    pub fn title(&self) -> String {
        format!("{} - {}", description::VIDEO_TITLE, self.i18n.tr("window-title"))
    }

    pub fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        media::media_playback(self.source_url.clone(), PLAYBACK_SESSION).map(Message::Playback)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Player(msg) => self.player.update(msg),
            Message::Playback(event) => self.handle_playback(event),
        }
        Task::none()
    }

    fn handle_playback(&mut self, event: PlaybackMessage) {
        match event {
            PlaybackMessage::Started(commands) => {
                log::debug!("Decoder started for {}", self.source_url);
                self.media_error = None;
                let mut video = RemoteVideo::new(commands);
                // Carry over choices made before the decoder came up
                let state = *self.player.state();
                video.set_volume(state.volume.value());
                video.set_playback_rate(state.speed.rate());
                self.player.bind(video);
            }
            PlaybackMessage::MetadataLoaded(metadata) => {
                log::info!(
                    "Video {}x{}, duration {:?}",
                    metadata.width,
                    metadata.height,
                    metadata.duration_secs
                );
                if let Some(video) = self.player.media_mut() {
                    video.set_metadata(metadata);
                }
                self.player.update(player::Message::TimeUpdate);
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
                pts_secs,
            } => {
                let current = self
                    .player
                    .media_mut()
                    .is_none_or(|video| video.observe_frame(pts_secs));
                if !current {
                    log::trace!("Dropping frame at {:.3}s decoded before a seek", pts_secs);
                    return;
                }
                let pixels = Arc::unwrap_or_clone(rgba_data);
                self.frame = Some(image::Handle::from_rgba(width, height, pixels));
                self.player.update(player::Message::TimeUpdate);
            }
            PlaybackMessage::Buffering => log::debug!("Decoder buffering"),
            PlaybackMessage::Seeked { target_secs } => {
                log::debug!("Seek to {:.3}s done", target_secs);
                if let Some(video) = self.player.media_mut() {
                    video.seek_completed();
                }
            }
            PlaybackMessage::EndOfStream => {
                log::info!("Reached end of stream");
                self.player.update(player::Message::Ended);
            }
            PlaybackMessage::Error(message) => {
                log::warn!("Playback error: {}", message);
                self.media_error = Some(MediaError::from_message(&message));
            }
        }
    }

    fn surface(&self) -> Surface<'_> {
        match (&self.frame, &self.media_error) {
            (Some(handle), _) => Surface::Frame(handle),
            (None, Some(err)) => Surface::Failed(err),
            (None, None) => Surface::Loading,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let state = self.player.state();
        let layout = PlayerLayout::from_state(state);

        let player = crate::ui::player::view(ViewContext {
            i18n: &self.i18n,
            state,
            surface: self.surface(),
        })
        .map(Message::Player);

        if !layout.show_panels {
            return player;
        }

        let page = column![
            player,
            description::view(&self.i18n),
            list_videos::view(&self.i18n),
        ]
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .padding([0.0, spacing::MD]);

        scrollable(container(page).center_x(Length::Fill))
            .height(Length::Fill)
            .into()
    }
}
