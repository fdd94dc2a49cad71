//! Identity types for the domain layer.
//!
//! `CurrentUser` is the signed-in account as seen by the profile subsystem.
//! Authentication itself lives outside this crate: any session provider can
//! populate it through the `IdentityProvider` port.

use secrecy::{ExposeSecret, Secret};

use super::UserId;

/// The authenticated user the profile subsystem is acting for.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Account email, used as a display fallback.
    pub email: Option<String>,

    /// Session access token forwarded to the remote profile table, if any.
    access_token: Option<Secret<String>>,
}

impl CurrentUser {
    /// Creates a user without an email or session token.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            access_token: None,
        }
    }

    /// Sets the account email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the session access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Secret::new(token.into()));
        self
    }

    /// Exposes the access token for request signing.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    /// True when `other` refers to the same account.
    pub fn same_identity(&self, other: &CurrentUser) -> bool {
        self.id == other.id
    }
}
