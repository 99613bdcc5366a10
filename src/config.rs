//! Application configuration.
//!
//! Loaded from a TOML file (path in `DIRECTORY_CONFIG`, default
//! `directory.toml`). A missing file means defaults; every field has one.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:3000"
//!
//! [api]
//! base_url = "https://api.example.com/v1"
//!
//! [map]
//! enabled = false
//! ```
//!
//! `DIRECTORY_API_URL` and `DIRECTORY_BIND` override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "DIRECTORY_CONFIG";
pub const API_URL_ENV: &str = "DIRECTORY_API_URL";
pub const BIND_ENV: &str = "DIRECTORY_BIND";
const DEFAULT_CONFIG_PATH: &str = "directory.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_workers: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Distinct filter combinations kept in the listing cache.
    pub cache_entries: usize,
    /// 0 keeps cached listings until evicted.
    pub cache_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            timeout_secs: 10,
            user_agent: concat!("directory_web/", env!("CARGO_PKG_VERSION")).to_string(),
            cache_entries: 256,
            cache_ttl_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    /// When false the map never loads and pages fall back to the list.
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub center_lat: f64,
    pub center_lng: f64,
    pub default_zoom: f64,
    /// Framing a result set never zooms closer than this.
    pub max_fit_zoom: f64,
    pub selection_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 640,
            height: 420,
            center_lat: 9.7489,
            center_lng: -83.7534,
            default_zoom: 7.0,
            max_fit_zoom: 15.0,
            selection_zoom: 15.0,
        }
    }
}

impl AppConfig {
    /// Reads the file named by `DIRECTORY_CONFIG` (or the default path), then
    /// applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            tracing::info!(%path, "no config file, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api.base_url = url;
        }
        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.server.bind = bind;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url is empty".into()));
        }
        if self.server.max_workers == 0 {
            return Err(ConfigError::Invalid("server.max_workers must be > 0".into()));
        }
        if !(0.0..=21.0).contains(&self.map.max_fit_zoom)
            || !(0.0..=21.0).contains(&self.map.selection_zoom)
        {
            return Err(ConfigError::Invalid("map zoom levels must be within 0..=21".into()));
        }
        Ok(())
    }
}
