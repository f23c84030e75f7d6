//! Configuration management for Shelfdesk

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Locations of the three seed fixtures (file paths or http(s) URLs)
#[derive(Debug, Deserialize, Clone)]
pub struct FixturesConfig {
    pub books: String,
    pub members: String,
    pub transactions: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoansConfig {
    /// Days added to today to build the due date offered on the borrow form
    pub default_duration_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SHELFDESK_SERVER__PORT=9000, SHELFDESK_FIXTURES__BOOKS=http://...
            .add_source(
                Environment::with_prefix("SHELFDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            books: "fixtures/books.json".to_string(),
            members: "fixtures/members.json".to_string(),
            transactions: "fixtures/transactions.json".to_string(),
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self {
            default_duration_days: 14,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
