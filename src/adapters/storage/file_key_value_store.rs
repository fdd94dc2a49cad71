//! File-based Key-Value Store Adapter
//!
//! Stores each key as one file under a base directory. Keys are escaped
//! into file names so arbitrary keys (such as `@StudyApp:localProfile`)
//! map to distinct, portable paths.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, StoreError};

/// File-based key-value storage
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    pub fn item_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("key cannot be empty".to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", escape_key(key))))
    }
}

/// Percent-escapes every byte outside `[A-Za-z0-9._-]`.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => out.push(byte as char),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.item_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.base_path).await?;

        // Write to a temporary file first, then rename over the old value
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }
}
