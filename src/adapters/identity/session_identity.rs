//! Session identity adapter.
//!
//! The host's auth layer pushes sign-in, sign-out and token refresh events
//! into a `SessionIdentity`; the profile view-model subscribes to it.
//!
//! # Example
//!
//! ```ignore
//! use profile_sync::adapters::identity::SessionIdentity;
//! use profile_sync::domain::foundation::{CurrentUser, UserId};
//!
//! let identity = SessionIdentity::signed_out();
//! identity.sign_in(CurrentUser::new(UserId::new("user-123")?).with_email("ann@example.com"));
//! identity.sign_out();
//! ```

use tokio::sync::watch;

use crate::domain::foundation::CurrentUser;
use crate::ports::IdentityProvider;

/// Identity holder backed by a watch channel.
#[derive(Debug)]
pub struct SessionIdentity {
    tx: watch::Sender<Option<CurrentUser>>,
}

impl SessionIdentity {
    /// Creates a holder with nobody signed in.
    pub fn signed_out() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Creates a holder with `user` already signed in.
    pub fn signed_in(user: CurrentUser) -> Self {
        let (tx, _rx) = watch::channel(Some(user));
        Self { tx }
    }

    /// Signs `user` in, replacing any previous user.
    pub fn sign_in(&self, user: CurrentUser) {
        tracing::debug!(user_id = %user.id, "Identity changed: signed in");
        self.tx.send_replace(Some(user));
    }

    /// Signs the current user out.
    pub fn sign_out(&self) {
        tracing::debug!("Identity changed: signed out");
        self.tx.send_replace(None);
    }

    /// Replaces the session of the same user (e.g. a refreshed token)
    /// without notifying subscribers.
    ///
    /// Does nothing if nobody or a different user is signed in.
    pub fn update_session(&self, user: CurrentUser) {
        self.tx.send_if_modified(|current| {
            if let Some(existing) = current.as_mut().filter(|u| u.same_identity(&user)) {
                *existing = user;
            }
            false
        });
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<CurrentUser> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn user(id: &str) -> CurrentUser {
        CurrentUser::new(UserId::new(id).unwrap())
    }

    #[test]
    fn signed_out_has_no_user() {
        assert!(SessionIdentity::signed_out().current_user().is_none());
    }

    #[test]
    fn sign_in_and_sign_out_update_current_user() {
        let identity = SessionIdentity::signed_out();

        identity.sign_in(user("u1"));
        assert_eq!(identity.current_user().unwrap().id.as_str(), "u1");

        identity.sign_out();
        assert!(identity.current_user().is_none());
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_account_switch() {
        let identity = SessionIdentity::signed_in(user("u1"));
        let mut rx = identity.subscribe();

        identity.sign_in(user("u2"));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().id.as_str(), "u2");
    }

    #[tokio::test]
    async fn update_session_swaps_token_silently() {
        let identity = SessionIdentity::signed_in(user("u1"));
        let rx = identity.subscribe();

        identity.update_session(user("u1").with_access_token("fresh"));

        assert!(!rx.has_changed().unwrap());
        assert_eq!(identity.current_user().unwrap().access_token(), Some("fresh"));
    }

    #[test]
    fn update_session_ignores_other_users() {
        let identity = SessionIdentity::signed_in(user("u1"));

        identity.update_session(user("u2").with_access_token("fresh"));

        assert_eq!(identity.current_user().unwrap().id.as_str(), "u1");
        assert!(identity.current_user().unwrap().access_token().is_none());
    }
}
