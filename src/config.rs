//! Configuration handling for the dish form

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Endpoint the dishes API has always been served from
pub const DEFAULT_ENDPOINT: &str = "https://umzzcc503l.execute-api.us-west-2.amazonaws.com/dishes/";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "DISH_FORM_ENDPOINT";

const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 7;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration, read from `config.json` in the platform config directory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Dish creation endpoint
    pub endpoint: Option<String>,
    /// How long notifications stay visible
    pub notification_timeout_secs: Option<u64>,
    /// Upper bound for one submission request
    pub request_timeout_secs: Option<u64>,
}

impl FormConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "dishes", "dish-form")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location; the terminal itself is owned by the UI
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("dish-form.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    fn apply_endpoint_override(&mut self, value: Option<String>) {
        if let Some(endpoint) = value.filter(|v| !v.trim().is_empty()) {
            self.endpoint = Some(endpoint);
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(
            self.notification_timeout_secs
                .unwrap_or(DEFAULT_NOTIFICATION_TIMEOUT_SECS),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.notification_timeout(), Duration::from_secs(7));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            endpoint: Some("http://localhost:8000/dishes/".to_string()),
            notification_timeout_secs: Some(3),
            request_timeout_secs: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.endpoint(), "http://localhost:8000/dishes/");
        assert_eq!(parsed.notification_timeout(), Duration::from_secs(3));
        assert_eq!(parsed.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint.is_none());
        assert!(parsed.notification_timeout_secs.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint": "http://example.test/", "theme": "dark"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint(), "http://example.test/");
    }

    #[test]
    fn test_endpoint_override() {
        let mut config = FormConfig {
            endpoint: Some("http://from-file/".to_string()),
            ..Default::default()
        };
        config.apply_endpoint_override(None);
        assert_eq!(config.endpoint(), "http://from-file/");

        config.apply_endpoint_override(Some("  ".to_string()));
        assert_eq!(config.endpoint(), "http://from-file/");

        config.apply_endpoint_override(Some("http://from-env/".to_string()));
        assert_eq!(config.endpoint(), "http://from-env/");
    }

    #[test]
    fn test_paths_do_not_panic() {
        let _config = FormConfig::config_path();
        let _log = FormConfig::log_path();
    }
}
