//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check values that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(Error::invalid_config("api.timeout_secs", "must be greater than zero"));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(Error::invalid_config(
                "api.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.location.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "location.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Application name shown in output
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
        }
    }
}

fn default_app_name() -> String {
    "EcoTracker".to_string()
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the users/discards service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_api_timeout(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

/// Location acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Seconds before a pending request becomes unavailable
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_location_timeout(),
        }
    }
}

impl LocationConfig {
    /// Acquisition timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_location_timeout() -> u64 {
    10
}

/// Collection point catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON or TOML catalog file; the built-in demo set is used when absent
    #[serde(default)]
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.api.base_url, "http://localhost:5000");
        assert_eq!(schema.location.timeout(), Duration::from_secs(10));
        assert!(schema.catalog.path.is_none());
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [api]
            base_url = "https://recycling.example.org"

            [catalog]
            path = "points.json"
            "#,
        )
        .unwrap();

        assert_eq!(schema.api.base_url, "https://recycling.example.org");
        assert_eq!(schema.api.timeout_secs, 30);
        assert_eq!(schema.catalog.path.as_deref(), Some("points.json"));
        assert_eq!(schema.logging.level, "warn");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut schema = ConfigSchema::default();
        schema.location.timeout_secs = 0;
        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut schema = ConfigSchema::default();
        schema.api.base_url = "localhost:5000".to_string();
        assert!(schema.validate().is_err());
    }
}
