use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::icon::DEFAULT_ICON_BASE_URL;

/// Environment variable that takes precedence over the stored key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// search_limit = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the geocoding API.
    #[serde(default = "default_api_base_url")]
    pub geo_base_url: String,

    /// Base URL of the current weather and forecast APIs.
    #[serde(default = "default_api_base_url")]
    pub data_base_url: String,

    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of candidate cities per search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u8,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_search_limit() -> u8 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            geo_base_url: default_api_base_url(),
            data_base_url: default_api_base_url(),
            icon_base_url: default_icon_base_url(),
            timeout_secs: default_timeout_secs(),
            search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// API key from the environment, falling back to the stored one.
    pub fn resolved_api_key(&self) -> Result<String> {
        self.api_key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::resolved_api_key`] with the environment value passed in.
    pub fn api_key_with_override(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `citycast configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
