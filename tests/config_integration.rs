// SPDX-License-Identifier: MPL-2.0
use iced_tube::config::{self, DEFAULT_SOURCE_URL};
use iced_tube::i18n::fluent::I18n;
use iced_tube::ui::theming::ThemeMode;
use std::fs;
use tempfile::tempdir;

#[test]
fn language_from_settings_file_selects_bundle() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    fs::write(&path, "[general]\nlanguage = \"fr\"\n").expect("write settings");
    let french = config::load_from_path(&path).expect("load french settings");
    let i18n = I18n::new(None, &french);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert!(!i18n.tr("player-play-tooltip").starts_with("MISSING"));

    fs::write(&path, "[general]\nlanguage = \"pt-BR\"\n").expect("write settings");
    let brazilian = config::load_from_path(&path).expect("load pt-BR settings");
    let i18n = I18n::new(None, &brazilian);
    assert_eq!(i18n.current_locale().to_string(), "pt-BR");
}

#[test]
fn cli_language_wins_over_settings() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[general]\nlanguage = \"fr\"\n").expect("write settings");

    let config = config::load_from_path(&path).expect("load settings");
    let i18n = I18n::new(Some("en-US".into()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn directory_override_reads_sections() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("settings.toml"),
        "[general]\ntheme_mode = \"light\"\n\n[player]\nsource_url = \"file:///tmp/clip.mp4\"\n",
    )
    .expect("write settings");

    let config = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config.general.theme_mode, ThemeMode::Light);
    assert_eq!(config.player.source_url, "file:///tmp/clip.mp4");
}

#[test]
fn broken_settings_fall_back_to_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(dir.path().join("settings.toml"), "[player\nsource_url = ").expect("write settings");

    let config = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config.player.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(config.general.theme_mode, ThemeMode::System);
}
