//! Configuration management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use evassist_fetch::FetchSettings;
use evassist_location::LocationConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json_if_exists, save_json};
use crate::prediction_cache::DEFAULT_TTL_HOURS;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Location settings.
    #[serde(default)]
    pub location: LocationConfig,
    /// Prediction cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Results per nearby page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts per request.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Prediction cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
    /// Override for the storage file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    FetchSettings::DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn default_ttl_hours() -> u32 {
    DEFAULT_TTL_HOURS as u32
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ApiConfig {
    /// Returns the fetch settings this section describes.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            timeout: Duration::from_secs(self.timeout_secs),
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            storage_path: None,
        }
    }
}

impl CacheConfig {
    /// Returns the entry lifetime.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.ttl_hours))
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads configuration from a specific path. A missing file yields defaults.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let Some(config) = load_json_if_exists::<Config>(path).await? else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        };
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path()).await
    }

    /// Saves configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values that would make the pipeline unusable.
    pub fn validate(&self) -> Result<(), StoreError> {
        let api = &self.api;
        if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                api.base_url
            )));
        }
        if api.page_size == 0 {
            return Err(StoreError::Config("api.page_size must be at least 1".into()));
        }
        if api.timeout_secs == 0 {
            return Err(StoreError::Config("api.timeout_secs must be at least 1".into()));
        }
        if api.max_attempts == 0 {
            return Err(StoreError::Config("api.max_attempts must be at least 1".into()));
        }
        if self.cache.ttl_hours == 0 {
            return Err(StoreError::Config("cache.ttl_hours must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.max_attempts, 3);
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(config.cache.ttl(), chrono::Duration::hours(24));
        assert!(config.validate().is_ok());

        let settings = config.api.fetch_settings();
        assert_eq!(settings, FetchSettings::default());
    }

    #[test]
    fn test_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"api":{"base_url":"https://ev.example.com","page_size":20}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://ev.example.com");
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.api.max_attempts, 3);
        assert_eq!(config.location, LocationConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.page_size = 0;
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        let mut config = Config::default();
        config.api.base_url = "ftp://nope".into();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).await.unwrap();
        assert_eq!(config, Config::default());
    }
}
