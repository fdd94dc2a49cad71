//! Identity provider port for the signed-in user.
//!
//! Authentication is owned by the host application. The profile subsystem
//! only needs to know who is signed in right now and to be told when that
//! changes, so it can reconcile again for the new account.

use tokio::sync::watch;

use crate::domain::foundation::CurrentUser;

/// Supplies the current user and notifies on sign-in, sign-out and account switch.
///
/// # Contract
///
/// - `current_user()` returns the same value the latest receiver would see
/// - every receiver from `subscribe()` observes each change of identity
///   (intermediate values may be coalesced, the latest is never lost)
pub trait IdentityProvider: Send + Sync {
    /// The user currently signed in, if any.
    fn current_user(&self) -> Option<CurrentUser>;

    /// A receiver that is notified whenever the signed-in user changes.
    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    /// Minimal implementation backed by a watch channel
    struct TestIdentity {
        tx: watch::Sender<Option<CurrentUser>>,
    }

    impl IdentityProvider for TestIdentity {
        fn current_user(&self) -> Option<CurrentUser> {
            self.tx.borrow().clone()
        }

        fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
            self.tx.subscribe()
        }
    }

    #[tokio::test]
    async fn subscribers_see_sign_in() {
        let (tx, _rx) = watch::channel(None);
        let identity = TestIdentity { tx };
        let mut rx = identity.subscribe();

        identity
            .tx
            .send_replace(Some(CurrentUser::new(UserId::new("u1").unwrap())));

        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|u| u.id.as_str().to_string()),
            Some("u1".to_string())
        );
        assert!(identity.current_user().is_some());
    }

    #[test]
    fn identity_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn IdentityProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn IdentityProvider>>();
    }
}
