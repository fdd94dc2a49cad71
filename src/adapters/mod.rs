//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the profile core to external systems:
//! - `gateway` - remote profile table (PostgREST, in-memory)
//! - `storage` - device-local key-value storage (file, in-memory)
//! - `identity` - signed-in user fed by the host's auth layer

pub mod gateway;
pub mod identity;
pub mod storage;

pub use gateway::{InMemoryProfileGateway, PostgrestConfig, PostgrestProfileGateway};
pub use identity::SessionIdentity;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
