//! Configuration management for Bookhaul.
//!
//! Handles loading, saving, and validating configuration from
//! platform-specific config directories.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Application name used for config directory.
const APP_NAME: &str = "Bookhaul";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crawl behavior settings.
    pub scraping: ScrapingConfig,

    /// Output locations.
    pub paths: PathsConfig,
}

/// Crawl behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Catalog front page URL.
    pub base_url: String,

    /// Delay before each web request in seconds.
    pub delay_between_requests_sec: f64,

    /// Upper bound on in-flight requests.
    pub max_concurrent_requests: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_sec: u64,

    /// Attempts per request before giving up.
    pub retries: u32,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com/".to_string(),
            delay_between_requests_sec: 0.5,
            max_concurrent_requests: 4,
            request_timeout_sec: 30,
            retries: 3,
        }
    }
}

/// Output path configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for JSON/CSV exports.
    pub data_directory: PathBuf,

    /// Directory for downloaded cover images.
    pub images_directory: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            images_directory: PathBuf::from("images"),
        }
    }
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            // Create default config
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.scraping.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "scraping.base_url".to_string(),
                message: "must be an absolute URL".to_string(),
            });
        }

        if self.scraping.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scraping.max_concurrent_requests".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.scraping.retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scraping.retries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.scraping.delay_between_requests_sec < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "scraping.delay_between_requests_sec".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(())
    }
}
