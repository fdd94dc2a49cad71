//! SaveProfile - Command handler for the edit screen's save button.
//!
//! Edits are durable on the device only: the record replaces the local
//! cache slot and the next reconciliation overlays it on the remote row.

use crate::application::profile_store::LocalProfileStore;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::profile::{keys, ProfileFields};

/// Command carrying the edit form's values.
///
/// Blank values (empty or whitespace only) are written as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveProfileCommand {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
}

impl SaveProfileCommand {
    /// Builds the full replacement record stamped with `saved_at`.
    pub fn into_record(self, saved_at: Timestamp) -> ProfileFields {
        ProfileFields::new()
            .with(keys::FULL_NAME, blank_to_null(self.full_name))
            .with(keys::USERNAME, blank_to_null(self.username))
            .with(keys::BIO, blank_to_null(self.bio))
            .with(keys::WEBSITE, blank_to_null(self.website))
            .with(keys::AVATAR_URL, blank_to_null(self.avatar_url))
            .with(keys::UPDATED_AT, saved_at.to_rfc3339())
    }
}

/// Outcome of a save. Never an `Err`: the edit surface decides how to
/// report a failed write.
#[derive(Debug, Clone)]
pub struct SaveProfileResult {
    /// The record that was (or would have been) written.
    pub record: ProfileFields,
    pub failure: Option<DomainError>,
}

impl SaveProfileResult {
    pub fn is_persisted(&self) -> bool {
        self.failure.is_none()
    }
}

/// Handler writing edits to the local cache.
#[derive(Debug, Clone)]
pub struct SaveProfileHandler {
    cache: LocalProfileStore,
}

impl SaveProfileHandler {
    pub fn new(cache: LocalProfileStore) -> Self {
        Self { cache }
    }

    pub fn store(&self) -> &LocalProfileStore {
        &self.cache
    }

    pub async fn handle(&self, cmd: SaveProfileCommand) -> SaveProfileResult {
        let record = cmd.into_record(Timestamp::now());

        let failure = self.cache.set(&record).await.err();
        if failure.is_none() {
            tracing::debug!(key = %self.cache.key(), "Profile saved locally");
        }

        SaveProfileResult { record, failure }
    }
}

fn blank_to_null(value: Option<String>) -> serde_json::Value {
    match value {
        Some(text) if !text.trim().is_empty() => serde_json::Value::String(text),
        _ => serde_json::Value::Null,
    }
}
