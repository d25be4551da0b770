// SPDX-License-Identifier: MPL-2.0
//! Player control bar.
//!
//! A seek slider spanning the full width, with a row underneath holding
//! play/pause and volume on the left, speed and fullscreen on the right.

use crate::i18n::fluent::I18n;
use crate::player::{Message, PlaybackSpeed, PlayerState};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use iced::widget::{
    button, column, container, mouse_area, pick_list, row, slider, text, tooltip, Space, Text,
};
use iced::{Alignment, Element, Length};

/// Seek slider granularity in percent.
const SEEK_STEP_PERCENT: f64 = 0.1;

/// Volume slider granularity in percent.
const VOLUME_STEP_PERCENT: f32 = 1.0;

/// Wraps a control in a tooltip shown above it.
fn with_tooltip<'a>(content: Element<'a, Message>, label: String) -> Element<'a, Message> {
    tooltip(content, Text::new(label), tooltip::Position::Top)
        .gap(spacing::XXS)
        .into()
}

fn icon_button<'a>(icon: iced::widget::Svg<'static>, on_press: Message) -> Element<'a, Message> {
    button(icons::sized(icon, sizing::ICON_SM))
        .on_press(on_press)
        .padding(spacing::XS)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::control)
        .into()
}

fn play_pause<'a>(state: &PlayerState, i18n: &I18n) -> Element<'a, Message> {
    let (icon, key) = if state.playing {
        (icons::pause(), "player-pause-tooltip")
    } else {
        (icons::play(), "player-play-tooltip")
    };
    with_tooltip(icon_button(icon, Message::TogglePlayback), i18n.tr(key))
}

/// Volume icon plus the slider revealed while the pointer is over it.
fn volume<'a>(state: &PlayerState, i18n: &I18n) -> Element<'a, Message> {
    let (icon, key) = if state.is_muted() {
        (icons::volume_mute(), "player-unmute-tooltip")
    } else {
        (icons::volume(), "player-mute-tooltip")
    };
    let toggle = with_tooltip(icon_button(icon, Message::ToggleMute), i18n.tr(key));

    let mut content = row![toggle]
        .spacing(spacing::XXS)
        .align_y(Alignment::Center);

    if state.volume_bar_visible {
        content = content.push(
            slider(
                0.0..=100.0,
                state.volume.as_percent(),
                Message::SetVolume,
            )
            .step(VOLUME_STEP_PERCENT)
            .style(styles::slider::progress)
            .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH)),
        );
    }

    mouse_area(content)
        .on_enter(Message::ShowVolumeBar)
        .on_exit(Message::HideVolumeBar)
        .into()
}

fn speed_picker<'a>(state: &PlayerState, i18n: &I18n) -> Element<'a, Message> {
    let picker = pick_list(
        PlaybackSpeed::ALL,
        Some(state.speed),
        Message::SetPlaybackSpeed,
    )
    .text_size(typography::BODY);

    row![
        text(i18n.tr("player-speed-label")).size(typography::BODY),
        picker
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center)
    .into()
}

fn fullscreen<'a>(state: &PlayerState, i18n: &I18n) -> Element<'a, Message> {
    let (icon, key) = if state.fullscreen {
        (icons::fullscreen_exit(), "player-fullscreen-exit-tooltip")
    } else {
        (icons::fullscreen(), "player-fullscreen-enter-tooltip")
    };
    with_tooltip(icon_button(icon, Message::ToggleFullscreen), i18n.tr(key))
}

/// Renders the control bar. `overlay` selects the translucent background used
/// when the bar sits on top of the video.
pub fn view<'a>(state: &PlayerState, i18n: &I18n, overlay: bool) -> Element<'a, Message> {
    let seek = slider(0.0..=100.0, state.percentage.value(), Message::Seek)
        .step(SEEK_STEP_PERCENT)
        .style(styles::slider::progress)
        .width(Length::Fill);

    let left = row![play_pause(state, i18n), volume(state, i18n)]
        .spacing(spacing::XS)
        .align_y(Alignment::Center);

    let right = row![speed_picker(state, i18n), fullscreen(state, i18n)]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

    let buttons = row![left, Space::new().width(Length::Fill), right]
        .align_y(Alignment::Center)
        .width(Length::Fill);

    container(column![seek, buttons].spacing(spacing::XXS))
        .padding([spacing::XXS, spacing::XS])
        .width(Length::Fill)
        .style(styles::container::control_bar(overlay))
        .into()
}
