// SPDX-License-Identifier: MPL-2.0
//! Player control icons.
//!
//! SVG sources live in `assets/icons/`, are embedded at compile time via
//! `include_bytes!`, and their handles are cached using `OnceLock`.
//!
//! Icons use generic visual names describing their appearance,
//! not the action context.

use iced::widget::svg::{Handle, Svg};
use iced::Length;
use std::sync::OnceLock;

/// Defines an icon function with a handle created on first access.
macro_rules! define_icon {
    ($name:ident, $filename:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            static DATA: &[u8] =
                include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/icons/", $filename));
            let handle = HANDLE.get_or_init(|| Handle::from_memory(DATA));
            Svg::new(handle.clone())
        }
    };
}

define_icon!(play, "play.svg", "Play icon: triangle pointing right.");
define_icon!(pause, "pause.svg", "Pause icon: two vertical bars.");
define_icon!(
    volume,
    "volume.svg",
    "Volume icon: speaker with sound waves."
);
define_icon!(
    volume_mute,
    "volume_mute.svg",
    "Volume mute icon: speaker crossed out."
);
define_icon!(
    fullscreen,
    "fullscreen.svg",
    "Fullscreen icon: four corners pointing outward."
);
define_icon!(
    fullscreen_exit,
    "fullscreen_exit.svg",
    "Fullscreen exit icon: four corners pointing inward."
);

/// Sets a square size on an icon.
pub fn sized(icon: Svg<'static>, size: f32) -> Svg<'static> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}
