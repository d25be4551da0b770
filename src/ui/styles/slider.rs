// SPDX-License-Identifier: MPL-2.0
//! Slider styles for the seek and volume bars.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::slider;
use iced::{Background, Border, Color, Theme};

/// Thin rail filled with the accent color up to the handle.
///
/// The handle brightens while hovered or dragged.
pub fn progress(_theme: &Theme, status: slider::Status) -> slider::Style {
    let handle_color = match status {
        slider::Status::Hovered | slider::Status::Dragged => palette::PRIMARY_400,
        slider::Status::Active => palette::PRIMARY_500,
    };
    let remaining = Color {
        a: opacity::OVERLAY_HOVER,
        ..palette::GRAY_400
    };

    slider::Style {
        rail: slider::Rail {
            backgrounds: (
                Background::Color(palette::PRIMARY_500),
                Background::Color(remaining),
            ),
            width: 4.0,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: (radius::SM / 2.0).into(),
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle { radius: 6.0 },
            background: Background::Color(handle_color),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
