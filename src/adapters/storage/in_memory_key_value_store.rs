//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in a map for tests and development. A forced error can be
//! installed to exercise degraded-storage paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StoreError};

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    items: Arc<RwLock<HashMap<String, String>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with an IO error
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.write().await = Some(message.into());
    }

    /// Return to normal operation
    pub async fn clear_failure(&self) {
        *self.fail_with.write().await = None;
    }

    /// Get the number of stored items
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    async fn check_failure(&self) -> Result<(), StoreError> {
        match self.fail_with.read().await.as_ref() {
            Some(message) => Err(StoreError::IoError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_failure().await?;
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_failure().await?;
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
