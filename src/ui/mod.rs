// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they borrow
//! state and return elements emitting messages, never mutating anything.
//!
//! - [`player`] - Video surface and control bar
//! - [`description`] - Static description panel
//! - [`list_videos`] - Static related videos panel
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - SVG icon loading

pub mod description;
pub mod design_tokens;
pub mod icons;
pub mod list_videos;
pub mod player;
pub mod styles;
pub mod theming;
