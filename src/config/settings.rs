//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub payment: PaymentConfig,
    pub super_admin: SuperAdminConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Payment gateway simulation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    /// Probability in [0.0, 1.0] that a simulated transfer settles successfully
    pub success_rate: f64,
    /// Simulated settlement latency in milliseconds
    pub delay_ms: u64,
}

/// Super admin bootstrap identity, provisioned once at process start
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuperAdminConfig {
    pub username: String,
    pub email: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables.
    ///
    /// Defaults fill in anything the file and environment leave unset, but a
    /// present-and-malformed source is an error, never a silent fallback.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("EQUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EqubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/equb".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            payment: PaymentConfig {
                success_rate: 0.9,
                delay_ms: 1500,
            },
            super_admin: SuperAdminConfig {
                username: "superadmin".to_string(),
                email: "superadmin@example.com".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/equb".to_string(),
            },
        }
    }
}
