//! Configuration management for livenote.
//!
//! Configuration loading and validation using figment, supporting a TOML
//! config file, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::compress::{DEFAULT_CANVAS_SIZE, DEFAULT_JPEG_QUALITY};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "livenote";

/// Default state database file name.
const STATE_FILE_NAME: &str = "state.db";

/// Application configuration.
///
/// Loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LIVENOTE_`)
/// 2. TOML config file at `~/.config/livenote/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Export configuration.
    pub export: ExportConfig,
    /// Image compressor configuration.
    pub image: ImageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the state database file.
    /// Defaults to `~/.local/share/livenote/state.db`
    pub state_path: Option<PathBuf>,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export files are written to.
    /// Defaults to the current working directory.
    pub output_dir: Option<PathBuf>,
}

/// Image compressor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Canvas size in pixels (both dimensions).
    pub canvas_size: u32,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("LIVENOTE_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.image.canvas_size == 0 {
            return Err(Error::ConfigValidation {
                message: "image canvas_size must be greater than 0".to_string(),
            });
        }
        if self.image.jpeg_quality == 0 || self.image.jpeg_quality > 100 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "image jpeg_quality must be between 1 and 100 (got {})",
                    self.image.jpeg_quality
                ),
            });
        }
        Ok(())
    }

    /// Get the state database path, resolving the default if not set.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.storage
            .state_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(STATE_FILE_NAME))
    }

    /// Get the export output directory, resolving the default if not set.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
