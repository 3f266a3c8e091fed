//! API server configuration

use std::env;

use anyhow::{Context, Result};

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 8080)
    pub port: u16,

    /// PostgreSQL connection URL
    pub database_url: String,

    /// Connection pool size (default: 10)
    pub database_max_connections: u32,

    /// Allowed CORS origins; permissive when unset
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; everything else has a development
    /// default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_an_error() {
        // Only meaningful when the variable is not present in the test env.
        if env::var("DATABASE_URL").is_err() {
            assert!(Config::from_env().is_err());
        }
    }
}
