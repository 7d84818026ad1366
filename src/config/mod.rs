// SPDX-License-Identifier: MPL-2.0
//! This module handles the presenter's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Durations, exit animation delay, optional visible cap
//! - `[network]` - Response header names inspected by the fetch middleware
//! - `[forms]` - Submit button loading label and restore delay
//! - `[diagnostics]` - Diagnostic event buffer size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Pass a directory to `load_with_override()`
//! 3. Set the `STOREFRONT_TOASTS_CONFIG_DIR` environment variable
//! 4. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use storefront_toasts::config;
//!
//! let (mut config, _warning) = config::load();
//! config.forms.loading_label = Some("Envoi...".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StorefrontToasts";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "STOREFRONT_TOASTS_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Toast lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// Duration used when `show` is called without one (ms, `0` = persistent).
    #[serde(
        default = "default_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_duration_ms: Option<i64>,

    /// Duration of toasts adopted from server-rendered banners (ms).
    #[serde(
        default = "default_server_message_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_message_duration_ms: Option<i64>,

    /// How long a hidden toast stays attached for its exit animation (ms).
    #[serde(default = "default_exit_delay_ms", skip_serializing_if = "Option::is_none")]
    pub exit_delay_ms: Option<u64>,

    /// Optional cap on simultaneously visible toasts. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            server_message_duration_ms: default_server_message_duration_ms(),
            exit_delay_ms: default_exit_delay_ms(),
            max_visible: None,
        }
    }
}

/// Response metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Header carrying the notification message.
    #[serde(default = "default_message_header", skip_serializing_if = "Option::is_none")]
    pub message_header: Option<String>,

    /// Header carrying the notification type.
    #[serde(default = "default_type_header", skip_serializing_if = "Option::is_none")]
    pub type_header: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            message_header: default_message_header(),
            type_header: default_type_header(),
        }
    }
}

/// Submit button feedback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormsConfig {
    /// Label shown while a POST form is submitting.
    #[serde(default = "default_loading_label", skip_serializing_if = "Option::is_none")]
    pub loading_label: Option<String>,

    /// Delay before the submit control is restored (ms).
    #[serde(
        default = "default_submit_restore_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub restore_delay_ms: Option<u64>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            loading_label: default_loading_label(),
            restore_delay_ms: default_submit_restore_delay_ms(),
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of lifecycle events kept in memory.
    #[serde(
        default = "default_diagnostics_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_diagnostics_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Presenter configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub forms: FormsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_duration_ms() -> Option<i64> {
    Some(DEFAULT_DURATION_MS)
}

fn default_server_message_duration_ms() -> Option<i64> {
    Some(SERVER_MESSAGE_DURATION_MS)
}

fn default_exit_delay_ms() -> Option<u64> {
    Some(EXIT_DELAY_MS)
}

fn default_message_header() -> Option<String> {
    Some(MESSAGE_HEADER.to_string())
}

fn default_type_header() -> Option<String> {
    Some(TYPE_HEADER.to_string())
}

fn default_loading_label() -> Option<String> {
    Some(LOADING_LABEL.to_string())
}

fn default_submit_restore_delay_ms() -> Option<u64> {
    Some(SUBMIT_RESTORE_DELAY_MS)
}

fn default_diagnostics_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring an explicit override first and
/// then the environment variable.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = base_dir {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Failed to load {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_config_path_with_override(None) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.notifications.max_visible = Some(5);
        config.forms.loading_label = Some("Envoi...".to_string());

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_errors_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[[[").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_without_file_returns_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[forms]\nloading_label = \"Patientez\"\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.forms.loading_label.as_deref(), Some("Patientez"));
        assert_eq!(loaded.forms.restore_delay_ms, Some(SUBMIT_RESTORE_DELAY_MS));
        assert_eq!(loaded.notifications.exit_delay_ms, Some(EXIT_DELAY_MS));
        assert_eq!(loaded.network.message_header.as_deref(), Some(MESSAGE_HEADER));
    }
}
