//! LocalProfileStore - the single-slot profile cache on the device.
//!
//! Holds the most recently saved profile record under one fixed key. The
//! slot is not namespaced by user: whoever is signed in gets the record
//! rebound to their id. Reads never fail: a missing, blank, corrupt or
//! unreadable value is reported as absence and logged.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::ProfileFields;
use crate::ports::KeyValueStore;

/// Storage key used by the mobile app for the locally edited profile.
pub const DEFAULT_PROFILE_KEY: &str = "@StudyApp:localProfile";

/// Profile cache on top of a key-value store.
#[derive(Clone)]
pub struct LocalProfileStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocalProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Uses [`DEFAULT_PROFILE_KEY`].
    pub fn with_default_key(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_PROFILE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the cached record. Any storage or decoding fault yields `None`.
    pub async fn get(&self) -> Option<ProfileFields> {
        let raw = match self.store.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, "Error loading local profile: {}", e);
                return None;
            }
        };

        if raw.trim().is_empty() {
            return None;
        }

        match ProfileFields::from_json_str(&raw) {
            Ok(fields) => Some(fields),
            Err(e) => {
                tracing::warn!(key = %self.key, "Ignoring unreadable local profile: {}", e);
                None
            }
        }
    }

    /// Replaces the cached record wholesale.
    ///
    /// Failures are logged here; callers may ignore the result.
    pub async fn set(&self, record: &ProfileFields) -> Result<(), DomainError> {
        let raw = record.to_json_string().map_err(|e| {
            tracing::warn!(key = %self.key, "Failed to encode local profile: {}", e);
            DomainError::new(ErrorCode::StorageError, e.to_string())
        })?;

        self.store.set_item(&self.key, &raw).await.map_err(|e| {
            tracing::warn!(key = %self.key, "Failed to save local profile: {}", e);
            DomainError::new(ErrorCode::StorageError, e.to_string()).with_detail("key", &self.key)
        })
    }
}

impl std::fmt::Debug for LocalProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalProfileStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
