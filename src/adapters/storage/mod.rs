//! Storage Adapters
//!
//! Implementations of the KeyValueStore port backing the local profile cache.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One file per key on disk (native builds)
//! - **InMemoryKeyValueStore** - Values in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use profile_sync::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let store = FileKeyValueStore::new("./data/cache");
//!
//! // Testing: in-memory storage
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
