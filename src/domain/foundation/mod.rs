//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the profile subsystem.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::CurrentUser;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;
