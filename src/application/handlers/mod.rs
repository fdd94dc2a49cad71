//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod profile;

pub use profile::{
    ReconcileProfileHandler, ReconcileProfileQuery, SaveProfileCommand, SaveProfileHandler,
    SaveProfileResult, DEFAULT_LOAD_ERROR_MESSAGE,
};
