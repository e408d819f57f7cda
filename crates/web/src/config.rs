//! Web server configuration.

use std::env;

use common::DatabaseConfig;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Backing store for the user repository
    pub database: DatabaseConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("WEB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Address the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
