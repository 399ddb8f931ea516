//! Application configuration management
//!
//! This module handles loading and validating configuration from environment
//! variables. All configuration is loaded at startup and validated before the
//! application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_CYCLE_TICKS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SITE_TIMEOUT_SECS,
    DEFAULT_TICK_INTERVAL_SECS, DEFAULT_USER_AGENT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Judge-site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base host of the judge; contest pages live on `{contest}.<base_host>`
    pub base_host: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Crawler configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub tick_interval_secs: u64,
    pub cycle_ticks: u64,
}

/// Query-cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            site: SiteConfig::from_env()?,
            crawler: CrawlerConfig::from_env()?,
            cache: CacheConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl SiteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_host: env::var("SITE_BASE_HOST")
                .map_err(|_| ConfigError::Missing("SITE_BASE_HOST".to_string()))?,
            user_agent: env::var("SITE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            timeout_secs: env::var("SITE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_SITE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SITE_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl CrawlerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tick_interval_secs: env::var("CRAWL_TICK_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_TICK_INTERVAL_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CRAWL_TICK_INTERVAL_SECS".to_string()))?,
            cycle_ticks: env::var("CRAWL_CYCLE_TICKS")
                .unwrap_or_else(|_| DEFAULT_CYCLE_TICKS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CRAWL_CYCLE_TICKS".to_string()))?,
        })
    }
}

impl CacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CACHE_TTL_SECS".to_string()))?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
