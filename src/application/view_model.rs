//! ProfileViewModel - observable profile state for presentation code.
//!
//! Owns the current [`ProfileState`] in a watch channel. Every refresh takes
//! a ticket from a monotonically increasing counter; only the most recently
//! issued refresh may publish its result, so a slow older request can never
//! overwrite a newer one. Once unmounted, settling requests are dropped.
//!
//! # Example
//!
//! ```ignore
//! let vm = ProfileViewModel::new(reconciler, saver, identity).mount();
//! let state = vm.settled().await;
//! if let Some(profile) = state.profile { /* render */ }
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::handlers::{
    ReconcileProfileHandler, ReconcileProfileQuery, SaveProfileCommand, SaveProfileHandler,
    SaveProfileResult,
};
use crate::application::profile_draft::ProfileDraft;
use crate::domain::foundation::{CurrentUser, UserId};
use crate::domain::profile::{self, Profile, ProfileState, ReconciliationResult};
use crate::ports::IdentityProvider;

struct Inner {
    reconciler: ReconcileProfileHandler,
    saver: SaveProfileHandler,
    identity: Arc<dyn IdentityProvider>,
    state: watch::Sender<ProfileState>,
    latest: AtomicU64,
    mounted: AtomicBool,
}

impl Inner {
    async fn refresh(&self) {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let user = self.identity.current_user();
        let refreshing = user.as_ref().map(|u| u.id.clone());

        if let Some(id) = &refreshing {
            self.state.send_if_modified(|state| {
                if !self.accepts(ticket) {
                    return false;
                }
                state.begin_refresh(id);
                true
            });
        }

        let result = self.reconciler.handle(ReconcileProfileQuery { user }).await;
        self.publish(ticket, refreshing.as_ref(), result);
    }

    fn publish(&self, ticket: u64, user: Option<&UserId>, result: ReconciliationResult) {
        // Checked under the channel's write lock so a newer refresh cannot
        // begin between the check and the update.
        self.state.send_if_modified(|state| {
            if !self.mounted.load(Ordering::SeqCst) {
                tracing::debug!(ticket, "Discarding profile result after unmount");
                return false;
            }
            if !self.accepts(ticket) {
                tracing::debug!(ticket, "Discarding superseded profile result");
                return false;
            }
            state.settle(user, result);
            true
        });
    }

    fn accepts(&self, ticket: u64) -> bool {
        self.mounted.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// View-model behind the profile screen.
pub struct ProfileViewModel {
    inner: Arc<Inner>,
    watcher: Option<JoinHandle<()>>,
}

impl ProfileViewModel {
    /// Creates a view-model in the loading state. Nothing is fetched until
    /// [`mount`](Self::mount) or [`refresh`](Self::refresh) is called.
    pub fn new(
        reconciler: ReconcileProfileHandler,
        saver: SaveProfileHandler,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let (state, _rx) = watch::channel(ProfileState::initial());
        Self {
            inner: Arc::new(Inner {
                reconciler,
                saver,
                identity,
                state,
                latest: AtomicU64::new(0),
                mounted: AtomicBool::new(true),
            }),
            watcher: None,
        }
    }

    /// Starts following the identity provider: refreshes once now and again
    /// whenever the signed-in user changes (sign-in, sign-out, switch).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(mut self) -> Self {
        if self.watcher.is_some() {
            return self;
        }

        let inner = Arc::clone(&self.inner);
        let mut identity = inner.identity.subscribe();

        self.watcher = Some(tokio::spawn(async move {
            let mut last = user_id(identity.borrow_and_update().as_ref());
            spawn_refresh(&inner);

            while identity.changed().await.is_ok() {
                let current = user_id(identity.borrow_and_update().as_ref());
                if current != last {
                    tracing::debug!(
                        from = ?last.as_ref().map(UserId::as_str),
                        to = ?current.as_ref().map(UserId::as_str),
                        "Signed-in user changed, refreshing profile"
                    );
                    last = current;
                    spawn_refresh(&inner);
                }
            }
        }));
        self
    }

    /// Stops following identity changes and drops any result that settles
    /// from now on. The last published state stays readable.
    pub fn unmount(&mut self) {
        self.inner.mounted.store(false, Ordering::SeqCst);
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ProfileState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.inner.state.subscribe()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.state.borrow().profile.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn not_found(&self) -> bool {
        self.inner.state.borrow().not_found
    }

    /// Re-runs reconciliation for whoever is signed in now.
    ///
    /// Safe to call concurrently; only the most recently issued call
    /// publishes. Never fails: errors end up in the state.
    pub async fn refresh(&self) {
        self.inner.refresh().await;
    }

    /// Writes the edit form to the local cache and, if the write persisted,
    /// refreshes so the new values show immediately.
    pub async fn save(&self, cmd: SaveProfileCommand) -> SaveProfileResult {
        let result = self.inner.saver.handle(cmd).await;
        if result.is_persisted() {
            self.refresh().await;
        }
        result
    }

    /// Draft for the edit screen, seeded from the cache and the shown profile.
    pub async fn edit_draft(&self) -> ProfileDraft {
        let profile = self.profile();
        ProfileDraft::load(self.inner.saver.store(), profile.as_ref()).await
    }

    /// Waits until no refresh is in flight and returns that state.
    pub async fn settled(&self) -> ProfileState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(ProfileState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Header name for the shown profile and the signed-in account.
    pub fn display_name(&self) -> String {
        let email = self.current_email();
        let state = self.inner.state.borrow();
        profile::display_name(state.profile.as_ref(), email.as_deref()).to_string()
    }

    /// Avatar placeholder letter for the shown profile.
    pub fn initials(&self) -> String {
        let email = self.current_email();
        let state = self.inner.state.borrow();
        profile::initials(state.profile.as_ref(), email.as_deref())
    }

    fn current_email(&self) -> Option<String> {
        self.inner.identity.current_user().and_then(|u| u.email)
    }
}

impl Drop for ProfileViewModel {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for ProfileViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileViewModel")
            .field("state", &*self.inner.state.borrow())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

fn user_id(user: Option<&CurrentUser>) -> Option<UserId> {
    user.map(|u| u.id.clone())
}

fn spawn_refresh(inner: &Arc<Inner>) {
    let inner = Arc::clone(inner);
    tokio::spawn(async move { inner.refresh().await });
}
