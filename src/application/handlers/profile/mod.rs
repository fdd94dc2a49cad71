//! Profile application handlers.
//!
//! Query and command handlers behind the profile screen and the edit screen.

mod reconcile_profile;
mod save_profile;

pub use reconcile_profile::{
    ReconcileProfileHandler, ReconcileProfileQuery, DEFAULT_LOAD_ERROR_MESSAGE,
};
pub use save_profile::{SaveProfileCommand, SaveProfileHandler, SaveProfileResult};
