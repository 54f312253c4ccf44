//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub archive: ArchiveConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location and caching of the exported archive
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Directory holding one sub-directory per workspace
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    /// Cache channel directory listings in memory
    #[serde(default = "default_listing_cache")]
    pub listing_cache: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "archive-viewer".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_root() -> PathBuf {
    PathBuf::from("./public/data")
}

fn default_listing_cache() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => default_env(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            Some(value) if value == "json" => LogFormat::Json,
            Some(value) if value == "pretty" => LogFormat::Pretty,
            Some(value) => return Err(ConfigError::InvalidValue("LOG_FORMAT", value)),
            None => LogFormat::default(),
        };

        let port = match lookup("API_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("API_PORT", value))?,
            None => default_port(),
        };

        let listing_cache = match lookup("ARCHIVE_LISTING_CACHE") {
            Some(value) => parse_bool(&value)
                .ok_or(ConfigError::InvalidValue("ARCHIVE_LISTING_CACHE", value))?,
            None => default_listing_cache(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: environment,
                log_format,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            archive: ArchiveConfig {
                data_root: lookup("ARCHIVE_DATA_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_root),
                listing_cache,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }

    /// Configuration for serving a given archive directory, used by tests
    #[must_use]
    pub fn for_data_root(data_root: impl Into<PathBuf>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
                log_format: LogFormat::default(),
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
            },
            archive: ArchiveConfig {
                data_root: data_root.into(),
                listing_cache: default_listing_cache(),
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.app.name, "archive-viewer");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.archive.data_root, PathBuf::from("./public/data"));
        assert!(config.archive.listing_cache);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "Production"),
            ("LOG_FORMAT", "json"),
            ("API_HOST", "0.0.0.0"),
            ("API_PORT", "8080"),
            ("ARCHIVE_DATA_ROOT", "/srv/exports"),
            ("ARCHIVE_LISTING_CACHE", "off"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert_eq!(config.api.address(), "0.0.0.0:8080");
        assert_eq!(config.archive.data_root, PathBuf::from("/srv/exports"));
        assert!(!config.archive.listing_cache);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));

        let err = AppConfig::from_lookup(lookup_from(&[("APP_ENV", "qa")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("APP_ENV", _)));

        let err =
            AppConfig::from_lookup(lookup_from(&[("ARCHIVE_LISTING_CACHE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("ARCHIVE_LISTING_CACHE", _)));
    }
}
