//! Configuration management for the application.
//!
//! Configuration is optional. It lets the platform paths and the detected
//! architecture be overridden, which is mostly useful on devices whose
//! firmware exposes the function row somewhere unusual.

use crate::platform::Architecture;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default sysfs file describing the function row on PC-style Chromebooks.
pub const DEFAULT_PHYSMAP_PATH: &str = "/sys/bus/platform/devices/i8042/serio0/function_row_physmap";

/// Default location of the flattened device tree on ARM Chromebooks.
pub const DEFAULT_DEVICE_TREE_PATH: &str = "/sys/firmware/fdt";

/// Platform probing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Forces an architecture instead of detecting it from `uname -m`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    /// Text file holding the PC-style function row scancodes
    pub physmap: PathBuf,
    /// Flattened device tree blob read on ARM
    pub device_tree: PathBuf,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            architecture: None,
            physmap: PathBuf::from(DEFAULT_PHYSMAP_PATH),
            device_tree: PathBuf::from(DEFAULT_DEVICE_TREE_PATH),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `$XDG_CONFIG_HOME/cros-keymap/config.toml` (usually `~/.config`)
/// - macOS: `~/Library/Application Support/cros-keymap/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform probing settings
    pub platform: PlatformConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("cros-keymap");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, or no config directory can be determined,
    /// returns the default configuration.
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::new()),
        }
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }
}
