use std::env;
use thiserror::Error;

use crate::cache::CacheConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} is not a valid port: {1}")]
    InvalidPort(String, std::num::ParseIntError),
}

/// Runtime settings, read from the process environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cache: CacheConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidPort(raw.clone(), e))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port,
            cache: CacheConfig::from_env(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
