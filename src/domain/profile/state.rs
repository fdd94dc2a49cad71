//! Reconciliation outcomes and the observable profile state.

use serde::Serialize;

use super::Profile;
use crate::domain::foundation::UserId;

/// Terminal outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciliationResult {
    /// No authenticated user; profile concepts do not apply.
    SignedOut,
    /// A profile is available (remote, local, or both merged).
    Found(Profile),
    /// Neither the remote table nor the local cache has a record.
    NotFound,
    /// The remote query failed for a reason other than absence.
    /// Carries the user-facing message, never the technical cause.
    Error(String),
}

/// Coarse status of the state as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Loading,
    SignedOut,
    Found,
    NotFound,
    Error,
}

/// Snapshot consumed by presentation code.
///
/// While loading, the previously settled profile stays visible. After a
/// failed refresh the previous profile is kept alongside the error. Both
/// only hold while the refreshing user owns that profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub not_found: bool,
    pub status: ProfileStatus,
}

impl ProfileState {
    /// State before the first refresh has settled.
    pub fn initial() -> Self {
        Self {
            profile: None,
            is_loading: true,
            error: None,
            not_found: false,
            status: ProfileStatus::Loading,
        }
    }

    /// Marks a refresh for `user` as in flight. The shown profile stays
    /// unless it belongs to someone else.
    pub fn begin_refresh(&mut self, user: &UserId) {
        self.retain_profile_of(Some(user));
        self.is_loading = true;
        self.error = None;
        self.not_found = false;
        self.status = ProfileStatus::Loading;
    }

    /// Applies a result settled for `user`.
    pub fn settle(&mut self, user: Option<&UserId>, result: ReconciliationResult) {
        self.is_loading = false;
        match result {
            ReconciliationResult::SignedOut => {
                self.profile = None;
                self.error = None;
                self.not_found = false;
                self.status = ProfileStatus::SignedOut;
            }
            ReconciliationResult::Found(profile) => {
                self.profile = Some(profile);
                self.error = None;
                self.not_found = false;
                self.status = ProfileStatus::Found;
            }
            ReconciliationResult::NotFound => {
                self.profile = None;
                self.error = None;
                self.not_found = true;
                self.status = ProfileStatus::NotFound;
            }
            ReconciliationResult::Error(message) => {
                self.retain_profile_of(user);
                self.error = Some(message);
                self.not_found = false;
                self.status = ProfileStatus::Error;
            }
        }
    }

    fn retain_profile_of(&mut self, user: Option<&UserId>) {
        let owned = match (&self.profile, user) {
            (Some(profile), Some(user)) => profile.id == *user,
            (Some(_), None) => false,
            (None, _) => true,
        };
        if !owned {
            self.profile = None;
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::initial()
    }
}
