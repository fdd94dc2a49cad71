//! Local profile cache configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::DEFAULT_PROFILE_KEY;

/// Device-local cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one file per stored key
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Key the profile record is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CACHE__DIR"));
        }
        if self.key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CACHE__KEY"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}

fn default_key() -> String {
    DEFAULT_PROFILE_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.dir, PathBuf::from("./data/cache"));
        assert_eq!(config.key, "@StudyApp:localProfile");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_key() {
        let config = CacheConfig {
            key: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("CACHE__KEY"))
        );
    }
}
