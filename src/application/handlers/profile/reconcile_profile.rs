//! ReconcileProfile - Query handler producing the profile to show.
//!
//! Order of work for a signed-in user:
//! 1. ask the remote table for the user's row
//! 2. absence: fall back to the local cache, else not found
//! 3. failure: report a user-facing error, do not consult the cache
//! 4. success: overlay the local cache (if any) on the remote row

use std::sync::Arc;

use crate::application::profile_store::LocalProfileStore;
use crate::domain::foundation::CurrentUser;
use crate::domain::profile::{merge, rebase, ReconciliationResult};
use crate::ports::{FetchOutcome, ProfileGateway};

/// Message shown when the remote table cannot be reached or refuses the query.
pub const DEFAULT_LOAD_ERROR_MESSAGE: &str = "Could not load your profile. Please try again.";

/// Query to reconcile the profile of the signed-in user (if any).
#[derive(Debug, Clone)]
pub struct ReconcileProfileQuery {
    pub user: Option<CurrentUser>,
}

/// Handler combining the remote row and the local cache.
pub struct ReconcileProfileHandler {
    gateway: Arc<dyn ProfileGateway>,
    cache: LocalProfileStore,
    load_error_message: String,
}

impl ReconcileProfileHandler {
    pub fn new(gateway: Arc<dyn ProfileGateway>, cache: LocalProfileStore) -> Self {
        Self {
            gateway,
            cache,
            load_error_message: DEFAULT_LOAD_ERROR_MESSAGE.to_string(),
        }
    }

    /// Overrides the user-facing error message (e.g. with a translation).
    pub fn with_load_error_message(mut self, message: impl Into<String>) -> Self {
        self.load_error_message = message.into();
        self
    }

    pub fn cache(&self) -> &LocalProfileStore {
        &self.cache
    }

    pub async fn handle(&self, query: ReconcileProfileQuery) -> ReconciliationResult {
        let Some(user) = query.user else {
            return ReconciliationResult::SignedOut;
        };

        match self.gateway.fetch_by_id(&user).await.classify() {
            FetchOutcome::Absent => match self.cache.get().await {
                Some(local) => {
                    tracing::debug!(user_id = %user.id, "No remote profile, using local copy");
                    ReconciliationResult::Found(rebase(&user.id, local))
                }
                None => {
                    tracing::debug!(user_id = %user.id, "No remote or local profile");
                    ReconciliationResult::NotFound
                }
            },
            FetchOutcome::Failed(error) => {
                tracing::error!(
                    user_id = %user.id,
                    code = ?error.code,
                    details = ?error.details,
                    "Error fetching profile: {}",
                    error.message
                );
                ReconciliationResult::Error(self.load_error_message.clone())
            }
            FetchOutcome::Found(remote) => {
                let local = self.cache.get().await;
                ReconciliationResult::Found(merge(&user.id, remote, local.as_ref()))
            }
        }
    }
}
