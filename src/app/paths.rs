// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the config and asset directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--config-dir`, `--assets`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`GREETING_REEL_CONFIG_DIR`, `GREETING_REEL_ASSETS_DIR`)
//! 4. **Default** - platform config dir via `dirs`, `./assets` for media

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "GreetingReel";

/// Asset directory used when nothing else is configured.
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GREETING_REEL_CONFIG_DIR";

/// Environment variable to override the asset directory.
pub const ENV_ASSETS_DIR: &str = "GREETING_REEL_ASSETS_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

static CLI_ASSETS_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` and `--assets` arguments.
///
/// Call once at startup, before any path is resolved. Later calls are
/// ignored with a warning.
pub fn init_cli_overrides(config_dir: Option<String>, assets_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
        || CLI_ASSETS_DIR.set(assets_dir.map(PathBuf::from)).is_err()
    {
        tracing::warn!("CLI path overrides already initialized, ignoring");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn get_cli_assets_dir() -> Option<PathBuf> {
    CLI_ASSETS_DIR.get().and_then(Clone::clone)
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application config directory path (holds `settings.toml`).
///
/// Platform defaults:
/// - Linux: `~/.config/GreetingReel/`
/// - macOS: `~/Library/Application Support/GreetingReel/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\GreetingReel\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, honoring `override_path` first.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }

    if let Some(path) = env_path(ENV_CONFIG_DIR) {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the directory media references are resolved against.
pub fn get_assets_dir() -> PathBuf {
    get_assets_dir_with_override(None)
}

/// Returns the asset directory, honoring `override_path` first.
pub fn get_assets_dir_with_override(override_path: Option<PathBuf>) -> PathBuf {
    override_path
        .or_else(get_cli_assets_dir)
        .or_else(|| env_path(ENV_ASSETS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
}
