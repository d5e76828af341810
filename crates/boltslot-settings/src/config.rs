//! Configuration for boltslot runs
//!
//! Configuration is organized into sections:
//! - Paths (input and output directories)
//! - Adjustment limits and the default offset offered for thickness groups
//! - Output behaviour
//!
//! Files are JSON or TOML, chosen by extension. Missing keys fall back to
//! defaults, so an empty file is a valid configuration.

use boltslot_core::{Adjustment, AdjustmentRange, DEFAULT_MAX_ADJUSTMENT, DEFAULT_MIN_ADJUSTMENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory scanned for NC1 files
    pub input_dir: PathBuf,
    /// Directory receiving adjusted files
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Accepted adjustment values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSettings {
    /// Smallest accepted adjustment in mm
    pub min: f64,
    /// Largest accepted adjustment in mm
    pub max: f64,
    /// Value pre-filled for each thickness group in templates
    pub default: f64,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ADJUSTMENT,
            max: DEFAULT_MAX_ADJUSTMENT,
            default: 1.0,
        }
    }
}

/// Output file handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Replace output files left by an earlier run
    pub overwrite: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathSettings,
    pub adjustment: AdjustmentSettings,
    pub output: OutputSettings,
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::LoadError {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::SaveError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let adj = &self.adjustment;
        if !adj.min.is_finite() || !adj.max.is_finite() {
            return Err(ConfigError::InvalidSetting {
                key: "adjustment".to_string(),
                reason: "limits must be finite".to_string(),
            });
        }

        if adj.min >= adj.max {
            return Err(ConfigError::InvalidSetting {
                key: "adjustment".to_string(),
                reason: format!("min ({}) must be less than max ({})", adj.min, adj.max),
            });
        }

        if !self.adjustment_range().contains(adj.default) {
            return Err(ConfigError::ValueOutOfRange {
                key: "adjustment.default".to_string(),
                value: adj.default.to_string(),
            });
        }

        if self.paths.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "paths.input_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "paths.output_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.paths.input_dir == self.paths.output_dir {
            return Err(ConfigError::InvalidSetting {
                key: "paths.output_dir".to_string(),
                reason: "must differ from paths.input_dir".to_string(),
            });
        }

        Ok(())
    }

    /// Closed range adjustments are checked against
    pub fn adjustment_range(&self) -> AdjustmentRange {
        AdjustmentRange::new(self.adjustment.min, self.adjustment.max)
    }

    /// Default adjustment offered in thickness templates
    pub fn default_adjustment(&self) -> Adjustment {
        Adjustment::new(self.adjustment.default)
    }
}
