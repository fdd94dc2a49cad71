//! Remote profile table configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Values commonly left behind from `.env.example` files.
const PLACEHOLDER_KEYS: &[&str] = &["changeme", "your-anon-key", "<anon-key>"];

/// Remote profile table (PostgREST) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,

    /// Publishable (anon) API key
    pub anon_key: Secret<String>,

    /// Table holding one row per user
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds; 0 disables the client timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Get timeout as Duration, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }

        let key = self.anon_key.expose_secret().trim();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__ANON_KEY"));
        }
        if PLACEHOLDER_KEYS.iter().any(|p| key.eq_ignore_ascii_case(p)) {
            return Err(ValidationError::PlaceholderValue("GATEWAY__ANON_KEY"));
        }

        let table_ok = !self.table.is_empty()
            && self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !table_ok {
            return Err(ValidationError::InvalidTableName(self.table.clone()));
        }
        Ok(())
    }
}

fn default_table() -> String {
    "profiles".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            url: "https://abc.supabase.co".to_string(),
            anon_key: Secret::new("eyJhbGciOi".to_string()),
            table: default_table(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        assert_eq!(config().timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = GatewayConfig {
            timeout_secs: 0,
            ..config()
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_validation_missing_url() {
        let config = GatewayConfig {
            url: String::new(),
            ..config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__URL"))
        );
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = GatewayConfig {
            url: "ftp://abc.supabase.co".to_string(),
            ..config()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidGatewayUrl));
    }

    #[test]
    fn test_validation_rejects_placeholder_key() {
        let config = GatewayConfig {
            anon_key: Secret::new("CHANGEME".to_string()),
            ..config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::PlaceholderValue("GATEWAY__ANON_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_blank_key() {
        let config = GatewayConfig {
            anon_key: Secret::new("  ".to_string()),
            ..config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__ANON_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_odd_table_name() {
        let config = GatewayConfig {
            table: "profiles?select=*".to_string(),
            ..config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTableName(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("eyJhbGciOi"));
    }
}
