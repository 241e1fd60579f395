//! Configuration management for the key event harness
//!
//! Settings are loaded from a platform-specific config file, and any value
//! can be overridden from the command line.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/key-event-harness/config.toml` |
//! | macOS | `~/Library/Application Support/key-event-harness/config.toml` |
//! | Windows | `%APPDATA%\key-event-harness\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use key_event_harness::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.verifier.number_of_checks = 5;
//! config.save().expect("Failed to save config");
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR: &str = "key-event-harness";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn app_dir(base: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let dir = base.ok_or(ConfigError::NoConfigDir)?.join(APP_DIR);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Returns the path to the config file, creating its directory if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir(dirs::config_dir())?.join("config.toml"))
}

/// Returns the default log file path, creating its directory if needed.
pub fn log_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir(dirs::cache_dir())?.join("harness.log"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Challenge and verification settings
    #[serde(default)]
    pub verifier: VerifierConfig,
    /// Prompt window settings
    #[serde(default)]
    pub window: WindowConfig,
}

/// Verifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    /// Correct rounds needed to pass
    pub number_of_checks: u32,
    /// Extra weight given to "no modifiers" when picking a key combination.
    /// Modifiers are drawn from `0..weight + 7`; draws below `weight` mean none.
    pub no_modifier_weight: u32,
    /// Fail as soon as a modifier key outside the target combination is pressed
    pub strict_modifier_keys: bool,
    /// Fixed seed for challenge selection, random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            number_of_checks: 10,
            no_modifier_weight: 3,
            strict_modifier_keys: false,
            seed: None,
        }
    }
}

/// Prompt window configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    /// Prompt width in cells
    pub width: u16,
    /// Prompt height in cells
    pub height: u16,
    /// Redraw and poll rate (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme (dark/light)
    pub theme: Theme,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 10,
            refresh_rate_hz: 60,
            theme: Theme::Dark,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Poll timeout for one loop iteration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.window.refresh_rate_hz.max(1) as u64)
    }
}
