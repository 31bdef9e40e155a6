// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in a `settings.toml` file, plus the optional
//! media manifest (see [`manifest`]).
//!
//! # Configuration Sections
//!
//! - `[general]` - theme mode
//! - `[playback]` - autoplay and volume
//! - `[gallery]` - swipe threshold
//! - `[gift]` - reveal delay
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. `--config-dir` on the command line
//! 3. `GREETING_REEL_CONFIG_DIR` environment variable
//! 4. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use greeting_reel::config;
//!
//! let (config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! println!("volume: {}", config.volume().value());
//! ```

pub mod defaults;
pub mod manifest;

pub use defaults::*;

use crate::app::paths;
use crate::domain::playback::Volume;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Start a track as soon as it is ready.
    #[serde(default = "default_autoplay")]
    pub autoplay: Option<bool>,

    /// Output volume (0.0 to 1.0).
    #[serde(default = "default_volume")]
    pub volume: Option<f32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            volume: default_volume(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Minimum swipe travel in logical pixels.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: Option<f32>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: default_swipe_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GiftConfig {
    /// How long the revealed ticket is shown before completion, in ms.
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: Option<u64>,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub gift: GiftConfig,
}

impl Config {
    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.playback.autoplay.unwrap_or(DEFAULT_AUTOPLAY)
    }

    /// Configured volume, clamped to the valid range.
    #[must_use]
    pub fn volume(&self) -> Volume {
        Volume::new(self.playback.volume.unwrap_or(DEFAULT_VOLUME))
    }

    /// Configured swipe threshold, clamped to the valid range.
    #[must_use]
    pub fn swipe_threshold(&self) -> f32 {
        let value = self
            .gallery
            .swipe_threshold_px
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD_PX);
        value.clamp(MIN_SWIPE_THRESHOLD_PX, MAX_SWIPE_THRESHOLD_PX)
    }

    /// Configured reveal delay, clamped to the valid range.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        let ms = self
            .gift
            .reveal_delay_ms
            .unwrap_or(DEFAULT_REVEAL_DELAY_MS)
            .clamp(MIN_REVEAL_DELAY_MS, MAX_REVEAL_DELAY_MS);
        Duration::from_millis(ms)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_autoplay() -> Option<bool> {
    Some(DEFAULT_AUTOPLAY)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_reveal_delay() -> Option<u64> {
    Some(DEFAULT_REVEAL_DELAY_MS)
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

// =============================================================================
// Load
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns the config and an optional warning. A missing file is not an
/// error; an unreadable or invalid one yields defaults plus a warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => (
            Config::default(),
            Some(format!(
                "could not read {}, using defaults: {}",
                path.display(),
                err
            )),
        ),
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
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn every_section_is_read_from_file() {
        let expected = Config {
            general: GeneralConfig {
                theme_mode: ThemeMode::Light,
            },
            playback: PlaybackConfig {
                autoplay: Some(false),
                volume: Some(0.4),
            },
            gallery: GalleryConfig {
                swipe_threshold_px: Some(80.0),
            },
            gift: GiftConfig {
                reveal_delay_ms: Some(1_500),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[general]\ntheme_mode = \"light\"\n\n\
             [playback]\nautoplay = false\nvolume = 0.4\n\n\
             [gallery]\nswipe_threshold_px = 80.0\n\n\
             [gift]\nreveal_delay_ms = 1500\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded, expected);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[gift]\nreveal_delay_ms = 500\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.reveal_delay(), Duration::from_millis(500));
        assert_eq!(loaded.playback, PlaybackConfig::default());
        assert_eq!(loaded.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"sepia\"\n").expect("write");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_warns_on_corrupt_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[[[").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_reads_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "[gallery]\nswipe_threshold_px = 75.0\n",
        )
        .expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_abs_diff_eq!(config.swipe_threshold(), 75.0);
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let mut config = Config::default();
        config.playback.volume = Some(3.0);
        config.gallery.swipe_threshold_px = Some(-10.0);
        config.gift.reveal_delay_ms = Some(10_000_000);

        assert_abs_diff_eq!(config.volume().value(), MAX_VOLUME);
        assert_abs_diff_eq!(config.swipe_threshold(), MIN_SWIPE_THRESHOLD_PX);
        assert_eq!(
            config.reveal_delay(),
            Duration::from_millis(MAX_REVEAL_DELAY_MS)
        );
    }

    #[test]
    fn default_config_uses_default_constants() {
        let config = Config::default();
        assert!(config.autoplay());
        assert_abs_diff_eq!(config.volume().value(), DEFAULT_VOLUME);
        assert_abs_diff_eq!(config.swipe_threshold(), DEFAULT_SWIPE_THRESHOLD_PX);
        assert_eq!(
            config.reveal_delay(),
            Duration::from_millis(DEFAULT_REVEAL_DELAY_MS)
        );
    }
}
