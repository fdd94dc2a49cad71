//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, identity, errors)
//! - `profile` - Profile records, the local-over-remote merge and view state

pub mod foundation;
pub mod profile;
