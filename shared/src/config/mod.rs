//! Configuration structs for the backend services.
//!
//! Every section is loaded once at process start via its `from_env`
//! constructor; business logic never reads environment variables directly.

pub mod database;
pub mod server;
pub mod sms;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use sms::{DeliveryMode, SmsConfig};

use thiserror::Error;

/// Error raised while assembling configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// SMS delivery settings
    pub sms: SmsConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            sms: SmsConfig::from_env()?,
        })
    }
}
