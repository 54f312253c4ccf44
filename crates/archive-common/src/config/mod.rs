//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ArchiveConfig, ConfigError, CorsConfig, Environment, LogFormat,
    ServerConfig,
};
