//! Service configuration
//! Loaded from environment variables (optionally via a `.env` file)

use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ALLOWED_ORIGINS: &str = "https://panda-flax.vercel.app,http://localhost:3000";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory repository
    pub database: Option<DatabaseConfig>,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr_str = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidConfig(format!("Invalid BIND_ADDR '{}': {}", bind_addr_str, e))
        })?;

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(connection_string) => {
                let max_connections = lookup("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|| DEFAULT_MAX_CONNECTIONS.to_string())
                    .parse::<u32>()
                    .map_err(|e| {
                        ConfigError::InvalidConfig(format!("Invalid max_connections: {}", e))
                    })?;

                if !(1..=100).contains(&max_connections) {
                    return Err(ConfigError::InvalidConfig(
                        "DB_MAX_CONNECTIONS must be between 1 and 100".to_string(),
                    ));
                }

                debug!(
                    "Database configuration loaded: max_connections={}",
                    max_connections
                );
                Some(DatabaseConfig {
                    connection_string,
                    max_connections,
                })
            }
            None => None,
        };

        let origins_str = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins = origins_str
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::InvalidConfig(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Configuration loaded: bind_addr={}, database={}, cors_origins={}",
            bind_addr,
            if database.is_some() { "postgres" } else { "memory" },
            allowed_origins.len()
        );

        Ok(Config {
            bind_addr,
            database,
            allowed_origins,
        })
    }
}
