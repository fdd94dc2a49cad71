//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Tracing subscriber configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    /// Validate telemetry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_defaults() {
        let config = TelemetryConfig::default();
        assert_eq!(config.filter, "info");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_module_directives_are_accepted() {
        let config = TelemetryConfig {
            filter: "warn,profile_sync=debug".to_string(),
            json: true,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = TelemetryConfig {
            filter: "profile_sync=loud".to_string(),
            json: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}
