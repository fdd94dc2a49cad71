//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured filter when set.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs the global subscriber. A second call returns an error.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}
