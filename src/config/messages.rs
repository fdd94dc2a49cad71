//! User-facing message overrides

use serde::Deserialize;

use crate::application::DEFAULT_LOAD_ERROR_MESSAGE;

/// Texts shown to the user, overridable for localization
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    /// Shown when the remote profile cannot be loaded
    #[serde(default = "default_load_error")]
    pub load_error: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            load_error: default_load_error(),
        }
    }
}

fn default_load_error() -> String {
    DEFAULT_LOAD_ERROR_MESSAGE.to_string()
}
