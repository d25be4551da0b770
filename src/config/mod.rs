// SPDX-License-Identifier: MPL-2.0
//! Loads user preferences from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[player]` - Media source
//!
//! The file is read once at startup. A missing file yields defaults; an
//! unreadable or malformed file yields defaults and a logged warning.
//!
//! # Examples
//!
//! ```no_run
//! use iced_tube::config;
//!
//! let config = config::load();
//! println!("playing {}", config.player.source_url);
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Player settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Media resource to open on startup.
    #[serde(default = "default_source_url")]
    pub source_url: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub player: PlayerConfig,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
pub fn load() -> Config {
    load_with_override(None)
}

/// Loads the configuration from a custom directory, falling back to defaults.
pub fn load_with_override(base_dir: Option<PathBuf>) -> Config {
    let Some(path) = config_path_with_override(base_dir) else {
        return Config::default();
    };

    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Config::default();
    }

    match load_from_path(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring config file {}: {}", path.display(), err);
            Config::default()
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn default_config_plays_bundled_source() {
        let config = Config::default();
        assert_eq!(config.player.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.general.language, None);
        assert_eq!(config.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn load_from_path_reads_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[general]
language = "fr"
theme_mode = "Dark"

[player]
source_url = "http://example.com/clip.mp4"
"#,
        )
        .expect("failed to write config");

        let config = load_from_path(&path).expect("failed to load config");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
        assert_eq!(config.player.source_url, "http://example.com/clip.mp4");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[general]\nlanguage = \"pt-BR\"\n").expect("failed to write config");

        let config = load_from_path(&path).expect("failed to load config");
        assert_eq!(config.general.language.as_deref(), Some("pt-BR"));
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "this is not = valid = toml").expect("failed to write config");

        let result = load_from_path(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[general]\ntheme_mode = \"sepia\"\n").expect("failed to write config");

        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn load_with_override_falls_back_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[[[").expect("failed to write config");

        let config = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_missing_file_yields_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
    }
}
