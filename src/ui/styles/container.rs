// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Black backdrop behind the video surface.
pub fn video_surface(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Control bar background.
///
/// Opaque below the video, translucent when overlaid on it.
pub fn control_bar(overlay: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| {
        let alpha = if overlay {
            opacity::OVERLAY_STRONG
        } else {
            opacity::OPAQUE
        };
        container::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..palette::GRAY_900
            })),
            text_color: Some(palette::WHITE),
            ..Default::default()
        }
    }
}

/// Rounded dark card used by the description panel.
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::ZINC_800)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Placeholder rectangle standing in for a video thumbnail.
pub fn thumbnail(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_200)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
