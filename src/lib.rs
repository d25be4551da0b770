// SPDX-License-Identifier: MPL-2.0
//! `iced_tube` is a small video player built with the Iced GUI framework.
//!
//! It plays one remote video through FFmpeg with play/pause, seek, volume,
//! speed and fullscreen controls, above a static description and a list of
//! related videos.

#![doc(html_root_url = "https://docs.rs/iced_tube/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod player;
pub mod ui;

#[cfg(test)]
mod test_utils;
