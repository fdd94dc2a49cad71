//! Gateway Adapters
//!
//! Implementations of the ProfileGateway port.
//!
//! - **PostgrestProfileGateway** - hosted Postgres REST endpoint over HTTP
//! - **InMemoryProfileGateway** - rows in memory with scriptable responses

mod in_memory;
mod postgrest;

pub use in_memory::InMemoryProfileGateway;
pub use postgrest::{PostgrestConfig, PostgrestProfileGateway};
