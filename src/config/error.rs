//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Placeholder value left in configuration: {0}")]
    PlaceholderValue(&'static str),

    #[error("Invalid gateway URL format (expected http:// or https://)")]
    InvalidGatewayUrl,

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
