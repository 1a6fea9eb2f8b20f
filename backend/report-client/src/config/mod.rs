//! Client configuration.
//!
//! Loaded once at process start, validated, and handed to
//! [`crate::api::ApiClient::new`]. Nothing reads configuration after the
//! client is built.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "report-client.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";
pub const BASE_URL_ENV: &str = "REPORT_CLIENT_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "REPORT_CLIENT_TIMEOUT_SECS";
pub const MAX_RETRIES_ENV: &str = "REPORT_CLIENT_MAX_RETRIES";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetrySettings {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub files: FileSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
            files: FileSettings::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    3
}
fn default_initial_delay_ms() -> u64 {
    1_000
}
fn default_max_delay_ms() -> u64 {
    10_000
}
fn default_multiplier() -> f64 {
    2.0
}
fn default_page_limit() -> u32 {
    50
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with a trailing slash, so relative joins keep its path.
    pub fn normalized_base_url(&self) -> String {
        let trimmed = self.base_url.trim();
        if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        }
    }

    /// Load config from {config_dir}/report-client.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    #[track_caller]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Defaults overlaid with `.env` and process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {:?}", path),
            Err(_) => debug!("No .env file found - using existing environment variables"),
        }

        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup, then validate.
    #[track_caller]
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            debug!("{BASE_URL_ENV} overrides base URL");
            self.base_url = base_url;
        }

        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{TIMEOUT_SECS_ENV} is not a whole number of seconds: {raw}"),
            })?;
        }

        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            self.retry.max_retries =
                raw.trim().parse().map_err(|_| ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("{MAX_RETRIES_ENV} is not a retry count: {raw}"),
                })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate config values.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "base_url cannot be empty".to_string(),
            });
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {}", base_url),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.retry.max_delay_ms < self.retry.initial_delay_ms {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "max_delay_ms ({}) is below initial_delay_ms ({})",
                    self.retry.max_delay_ms, self.retry.initial_delay_ms
                ),
            });
        }

        if self.retry.multiplier.is_nan() || self.retry.multiplier < 1.0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("multiplier must be at least 1.0, got {}", self.retry.multiplier),
            });
        }

        Ok(())
    }
}
