use crate::providers::{frankfurter, open_er_api};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_frankfurter")]
    pub frankfurter: ProviderConfig,
    #[serde(default = "default_open_er_api")]
    pub open_er_api: ProviderConfig,
}

fn default_frankfurter() -> ProviderConfig {
    ProviderConfig {
        base_url: frankfurter::DEFAULT_BASE_URL.to_string(),
    }
}

fn default_open_er_api() -> ProviderConfig {
    ProviderConfig {
        base_url: open_er_api::DEFAULT_BASE_URL.to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            frankfurter: default_frankfurter(),
            open_er_api: default_open_er_api(),
        }
    }
}

/// Initial values for the editable inputs of a new session.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputDefaults {
    #[serde(default = "default_delivery_cost")]
    pub delivery_cost: String,
    #[serde(default = "default_markup_percent")]
    pub markup_percent: String,
}

fn default_delivery_cost() -> String {
    "500".to_string()
}

fn default_markup_percent() -> String {
    "0".to_string()
}

impl Default for InputDefaults {
    fn default() -> Self {
        InputDefaults {
            delivery_cost: default_delivery_cost(),
            markup_percent: default_markup_percent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub defaults: InputDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            timeout_secs: default_timeout_secs(),
            defaults: InputDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults
    /// when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "japan-car-calc", "japan-car-calc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
