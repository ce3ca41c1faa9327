//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{EqubError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_payment_config(&settings.payment)?;
    validate_super_admin_config(&settings.super_admin)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EqubError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(EqubError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EqubError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate payment simulation configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.success_rate) {
        return Err(EqubError::Config(
            "Payment success rate must be between 0.0 and 1.0".to_string(),
        ));
    }

    Ok(())
}

/// Validate super admin bootstrap configuration
fn validate_super_admin_config(config: &super::SuperAdminConfig) -> Result<()> {
    if config.username.is_empty() {
        return Err(EqubError::Config(
            "Super admin username is required".to_string(),
        ));
    }

    if config.email.is_empty() || !config.email.contains('@') {
        return Err(EqubError::Config(
            "Super admin email must be a valid address".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EqubError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EqubError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_success_rate() {
        let mut settings = Settings::default();
        settings.payment.success_rate = 1.5;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_zero_max_connections() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
