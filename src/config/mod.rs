use crate::core::{AppError, Result};
use crate::modules::reports::services::MAX_RANKING_RESULTS;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    pub run_migrations: bool,
}

/// Limits applied by listings and rankings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportingConfig {
    /// Largest `limit` a listing request may ask for
    pub max_page_size: i64,
    /// Ranking size when `maxResults` is omitted
    pub ranking_default_limit: i64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            max_page_size: crate::core::pagination::DEFAULT_MAX_PAGE_SIZE,
            ranking_default_limit: 10,
        }
    }
}

/// Read an optional variable, falling back to `default`
pub(crate) fn env_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", key)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                run_migrations: env_or("RUN_MIGRATIONS", "false")?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            reporting: ReportingConfig {
                max_page_size: env_or("PAGINATION_MAX_LIMIT", "500")?,
                ranking_default_limit: env_or("RANKING_DEFAULT_LIMIT", "10")?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.reporting.max_page_size <= 0 {
            return Err(AppError::Configuration(
                "PAGINATION_MAX_LIMIT must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_RANKING_RESULTS).contains(&self.reporting.ranking_default_limit) {
            return Err(AppError::Configuration(format!(
                "RANKING_DEFAULT_LIMIT must be between 1 and {}, got {}",
                MAX_RANKING_RESULTS, self.reporting.ranking_default_limit
            )));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(format!(
                "DATABASE_POOL_SIZE ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.database.pool_size, self.database.max_connections
            )));
        }

        if !matches!(self.app.log_format.as_str(), "pretty" | "json") {
            return Err(AppError::Configuration(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                self.app.log_format
            )));
        }

        Ok(())
    }
}
