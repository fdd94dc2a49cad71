//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROFILE_SYNC` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use profile_sync::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("Invalid configuration");
//!
//! println!("Profiles served from {}", config.gateway.url);
//! ```

mod cache;
mod error;
mod gateway;
mod messages;
mod telemetry;

pub use cache::CacheConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use messages::MessagesConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote profile table (PostgREST endpoint)
    pub gateway: GatewayConfig,

    /// Device-local profile cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// User-facing texts
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROFILE_SYNC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROFILE_SYNC__GATEWAY__URL=https://abc.supabase.co` -> `gateway.url`
    /// - `PROFILE_SYNC__CACHE__DIR=/var/lib/app` -> `cache.dir`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROFILE_SYNC")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and reject it unless [`validate`](Self::validate) passes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` for values that load but are unusable.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.cache.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
