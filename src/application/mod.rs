//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Reads (reconciliation) and writes (local save) have separate handlers;
//! the view-model drives both for the presentation layer.

pub mod handlers;
mod profile_draft;
mod profile_store;
mod view_model;

pub use handlers::{
    ReconcileProfileHandler, ReconcileProfileQuery, SaveProfileCommand, SaveProfileHandler,
    SaveProfileResult, DEFAULT_LOAD_ERROR_MESSAGE,
};
pub use profile_draft::ProfileDraft;
pub use profile_store::{LocalProfileStore, DEFAULT_PROFILE_KEY};
pub use view_model::ProfileViewModel;
