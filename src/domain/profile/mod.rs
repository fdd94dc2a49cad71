//! Profile module - the user's public profile and its reconciliation rules.
//!
//! A profile can come from two places: a row in the remote profile table
//! and a single locally cached record written by the edit screen. This
//! module owns the shapes of both and the rule that combines them.
//!
//! # Invariants
//!
//! 1. An exposed `Profile` always carries the current user's id
//! 2. Local columns override remote columns, key by key
//! 3. Unknown columns pass through unchanged
//! 4. A settled state is exactly one of found / not found / error / signed out

mod fields;
mod merge;
#[allow(clippy::module_inception)]
mod profile;
mod state;

pub use fields::ProfileFields;
pub use merge::{merge, rebase};
pub use profile::{display_name, initials, keys, Profile};
pub use state::{ProfileState, ProfileStatus, ReconciliationResult};
