//! Configuration and settings management for LaserCam
//!
//! Provides the laser parameters (feed rates, intensity) with their
//! invariants, the output preferences, and configuration file handling.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Laser settings (feed rate, rapid feed rate, laser power)
//! - Output settings (travel optimization, start position, inline laser mode)

use lasercam_core::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "lasercam.toml";

/// Laser parameters for one compile request
///
/// Invariants: `feed_rate > 0`, `rapid_feed_rate > 0`, `laser_power >= 0`.
/// [`LaserSettings::validate`] must pass before any generation begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Cutting feed rate in mm/min
    pub feed_rate: f64,
    /// Rapid (travel) feed rate in mm/min
    pub rapid_feed_rate: f64,
    /// Laser intensity written as the S parameter of cut moves
    pub laser_power: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            feed_rate: 1000.0,
            rapid_feed_rate: 3000.0,
            laser_power: 255.0,
        }
    }
}

impl LaserSettings {
    /// Create laser settings from the three numeric parameters
    pub fn new(feed_rate: f64, rapid_feed_rate: f64, laser_power: f64) -> Self {
        Self {
            feed_rate,
            rapid_feed_rate,
            laser_power,
        }
    }

    /// Check the numeric invariants
    ///
    /// Non-finite values are rejected along with out-of-range ones.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.feed_rate.is_finite() || self.feed_rate <= 0.0 {
            return Err(ValidationError::NonPositiveFeedRate {
                value: self.feed_rate,
            });
        }
        if !self.rapid_feed_rate.is_finite() || self.rapid_feed_rate <= 0.0 {
            return Err(ValidationError::NonPositiveRapidFeedRate {
                value: self.rapid_feed_rate,
            });
        }
        if !self.laser_power.is_finite() || self.laser_power < 0.0 {
            return Err(ValidationError::NegativeIntensity {
                value: self.laser_power,
            });
        }
        Ok(())
    }
}

/// Output preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Reorder shapes to reduce travel between them
    pub optimize_travel: bool,
    /// Pen X position the travel optimizer starts from
    pub start_x: f64,
    /// Pen Y position the travel optimizer starts from
    pub start_y: f64,
    /// Use inline laser mode (`M3 I` / `M5 I`) instead of plain `M3` / `M5`
    pub inline_laser: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            optimize_travel: true,
            start_x: 0.0,
            start_y: 0.0,
            inline_laser: true,
        }
    }
}

impl OutputSettings {
    /// Start position as an `(x, y)` pair
    pub fn start_position(&self) -> (f64, f64) {
        (self.start_x, self.start_y)
    }

    /// Validate output settings
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.start_x.is_finite() || !self.start_y.is_finite() {
            return Err(ValidationError::InvalidSetting {
                setting: "start position".to_string(),
                reason: format!("({}, {}) is not finite", self.start_x, self.start_y),
            });
        }
        Ok(())
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Laser parameters
    pub laser: LaserSettings,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.laser.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Default location of the user configuration file, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lasercam").join(CONFIG_FILE_NAME))
}
