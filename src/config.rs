//! Centralized configuration management for medboard

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    list::pagination::{is_valid_page_size, PAGE_SIZES},
    models::{Role, Theme},
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hospital REST API
    pub api_base_url: String,
    /// Bearer token sent with every request (optional)
    pub api_token: Option<String>,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// List view behaviour
    pub list: ListConfig,
    /// Color theme of the terminal UI
    pub theme: Theme,
    /// Display name of the signed-in user
    pub user_name: String,
    /// Role of the signed-in user
    pub role: Role,
    /// Log file written by the TUI
    pub log_file: PathBuf,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

/// List view configuration
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Rows per page when a list opens
    pub page_size: u32,
    /// Quiet period before a search is sent (milliseconds)
    pub search_debounce_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "medboard/0.1.0".to_string(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            search_debounce_ms: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            api_token: None,
            http: HttpConfig::default(),
            list: ListConfig::default(),
            theme: Theme::default(),
            user_name: "admin".to_string(),
            role: Role::Admin,
            log_file: PathBuf::from("medboard.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let api_base_url = std::env::var("MEDBOARD_API_URL").unwrap_or(defaults.api_base_url);
        let api_token = std::env::var("MEDBOARD_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let http = HttpConfig {
            timeout_seconds: parse_env_var("MEDBOARD_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: std::env::var("MEDBOARD_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        let list = ListConfig {
            page_size: parse_env_var("MEDBOARD_PAGE_SIZE")?.unwrap_or(defaults.list.page_size),
            search_debounce_ms: parse_env_var("MEDBOARD_SEARCH_DEBOUNCE_MS")?
                .unwrap_or(defaults.list.search_debounce_ms),
        };

        let theme = match std::env::var("MEDBOARD_THEME") {
            Ok(val) => val.parse::<Theme>().map_err(anyhow::Error::msg)?,
            Err(_) => defaults.theme,
        };

        let role = match std::env::var("MEDBOARD_ROLE") {
            Ok(val) => val.parse::<Role>().map_err(anyhow::Error::msg)?,
            Err(_) => defaults.role,
        };

        let user_name = std::env::var("MEDBOARD_USER").unwrap_or(defaults.user_name);
        let log_file = std::env::var("MEDBOARD_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        Ok(Config {
            api_base_url,
            api_token,
            http,
            list,
            theme,
            user_name,
            role,
            log_file,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Get search debounce as Duration
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.list.search_debounce_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_base_url))?;

        if !is_valid_page_size(self.list.page_size) {
            return Err(anyhow::anyhow!(
                "Unsupported page size {}. Supported sizes: {:?}",
                self.list.page_size,
                PAGE_SIZES
            ));
        }

        if self.list.search_debounce_ms == 0 {
            return Err(anyhow::anyhow!("Search debounce must be greater than zero"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        config.validate().unwrap();

        let mut bad_size = Config::default();
        bad_size.list.page_size = 20;
        assert!(bad_size.validate().is_err());

        let mut bad_url = Config::default();
        bad_url.api_base_url = "localhost api".to_string();
        assert!(bad_url.validate().is_err());

        let mut no_debounce = Config::default();
        no_debounce.list.search_debounce_ms = 0;
        assert!(no_debounce.validate().is_err());
    }

    #[test]
    fn test_parse_env_var() {
        std::env::set_var("MEDBOARD_TEST_PAGE_SIZE", "25");
        assert_eq!(parse_env_var::<u32>("MEDBOARD_TEST_PAGE_SIZE").unwrap(), Some(25));

        std::env::set_var("MEDBOARD_TEST_PAGE_SIZE", "many");
        assert!(parse_env_var::<u32>("MEDBOARD_TEST_PAGE_SIZE").is_err());

        assert_eq!(parse_env_var::<u32>("MEDBOARD_TEST_UNSET_VAR").unwrap(), None);
    }
}
