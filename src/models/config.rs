//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog site layout settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Database location settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_ms == 0 {
            return Err(AppError::validation("http.timeout_ms must be > 0"));
        }
        if self.catalog.index_url.trim().is_empty() {
            return Err(AppError::validation("catalog.index_url is empty"));
        }
        url::Url::parse(&self.catalog.index_url)
            .map_err(|e| AppError::validation(format!("catalog.index_url is invalid: {e}")))?;
        if !self.catalog.major_path.starts_with('/') {
            return Err(AppError::validation("catalog.major_path must start with '/'"));
        }
        if !self.catalog.minor_path.starts_with('/') {
            return Err(AppError::validation("catalog.minor_path must start with '/'"));
        }
        if self.database.path.trim().is_empty() {
            return Err(AppError::validation("database.path is empty"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub timeout_ms: u64,

    /// Delay between per-program fetches in milliseconds
    #[serde(default = "defaults::request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_ms: defaults::timeout_ms(),
            request_delay_ms: defaults::request_delay_ms(),
        }
    }
}

/// Catalog site layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the majors/minors index page
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// Path prefix identifying major detail pages
    #[serde(default = "defaults::major_path")]
    pub major_path: String,

    /// Path prefix identifying minor detail pages
    #[serde(default = "defaults::minor_path")]
    pub minor_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
            major_path: defaults::major_path(),
            minor_path: defaults::minor_path(),
        }
    }
}

/// Database location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "defaults::db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: defaults::db_path(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; progsync/0.1)".into()
    }
    pub fn timeout_ms() -> u64 {
        20_000
    }
    pub fn request_delay_ms() -> u64 {
        250
    }

    // Catalog defaults
    pub fn index_url() -> String {
        "https://catalog.example.edu/academics/concentrations/index.html".into()
    }
    pub fn major_path() -> String {
        "/academics/concentrations/majors/".into()
    }
    pub fn minor_path() -> String {
        "/academics/concentrations/minors/".into()
    }

    // Database defaults
    pub fn db_path() -> String {
        "progsync.db".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_index_url() {
        let mut config = Config::default();
        config.catalog.index_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [http]
            timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.http.timeout_ms, 5000);
        assert!(!config.http.user_agent.is_empty());
        assert_eq!(config.catalog.major_path, "/academics/concentrations/majors/");
    }
}
