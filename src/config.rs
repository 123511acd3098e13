//! Layered configuration.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (`LISTINGS_*`, `__` separates nested keys)
//! 2. TOML file named by `LISTINGS_CONFIG_FILE`
//! 3. Built-in defaults

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CSV_SOURCE: &str =
    "https://getgloby-realtor-challenge.s3.us-east-1.amazonaws.com/realtor-data.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite file holding listings and the zip cache.
    pub db_path: String,
    pub bind_addr: String,
    pub max_workers: usize,
    pub demographics: DemographicsConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Timeout for a single zip lookup.
    pub zip_timeout_ms: u64,
    /// Timeout for an attribute search, which returns much larger pages.
    pub search_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub source: String,
    pub batch_size: usize,
    pub connect_timeout_ms: u64,
    /// Limit on the whole download including the body. `0` means none.
    pub download_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "listings.sqlite3".into(),
            bind_addr: "0.0.0.0:3000".into(),
            max_workers: 8,
            demographics: DemographicsConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Default for DemographicsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://zipwho.com".into(),
            user_agent: "ListingsApiBot/1.0".into(),
            zip_timeout_ms: 5_000,
            search_timeout_ms: 10_000,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_CSV_SOURCE.into(),
            batch_size: 1000,
            connect_timeout_ms: 30_000,
            download_timeout_ms: 0,
        }
    }
}

impl DemographicsConfig {
    pub fn zip_timeout(&self) -> Duration {
        Duration::from_millis(self.zip_timeout_ms)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }
}

impl IngestConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        (self.download_timeout_ms > 0).then(|| Duration::from_millis(self.download_timeout_ms))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LISTINGS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        Self::from_figment(figment.merge(Env::prefixed("LISTINGS_").split("__")))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".into()));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::Invalid("max_workers must be at least 1".into()));
        }
        if self.demographics.zip_timeout_ms == 0 || self.demographics.search_timeout_ms == 0 {
            return Err(ConfigError::Invalid("demographics timeouts must be positive".into()));
        }
        if !self.demographics.base_url.starts_with("http") {
            return Err(ConfigError::Invalid(format!(
                "demographics.base_url is not an http url: {}",
                self.demographics.base_url
            )));
        }
        if self.ingest.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid("ingest.connect_timeout_ms must be positive".into()));
        }
        if self.ingest.batch_size == 0 {
            return Err(ConfigError::Invalid("ingest.batch_size must be at least 1".into()));
        }
        Ok(())
    }
}
