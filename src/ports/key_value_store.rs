//! Key-Value Store Port - device-local string storage.
//!
//! Mirrors the contract of mobile async storage and browser local storage:
//! string keys, string values, no schema. The profile cache lives under one
//! fixed key on top of this port.

use async_trait::async_trait;

/// Errors that can occur during key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            StoreError::PermissionDenied(err.to_string())
        } else {
            StoreError::IoError(err.to_string())
        }
    }
}

/// Port for device-local key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing is stored under the key
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_permission_denied_maps_to_permission_denied() {
        let err: StoreError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, StoreError::PermissionDenied(_)));
    }

    #[test]
    fn other_io_errors_map_to_io_error() {
        let err: StoreError = io::Error::new(io::ErrorKind::Other, "disk full").into();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn store_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn KeyValueStore) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn KeyValueStore>>();
    }
}
