//! Per-page-session identity state.
//!
//! An [`AuthContext`] starts out loading. [`AuthContext::resolve`] runs one
//! "who am I" round trip and publishes the result to every subscriber.
//! There is no polling and no background refresh: state changes only on
//! `resolve`, `logout` or `login_completed`.

use std::sync::atomic::{AtomicU64, Ordering};

use columbia_core::types::DbId;
use columbia_core::user::UserRecord;
use tokio::sync::{watch, Mutex};

use crate::source::IdentitySource;

/// What the UI knows about the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    /// `true` until the first resolution finishes.
    pub loading: bool,
    /// Id of the signed-in user, if any.
    pub identity: Option<DbId>,
    /// Full profile of the signed-in user, if any.
    pub user: Option<UserRecord>,
}

impl AuthSnapshot {
    pub fn loading() -> Self {
        Self {
            loading: true,
            identity: None,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            loading: false,
            identity: None,
            user: None,
        }
    }

    pub fn signed_in(user: UserRecord) -> Self {
        Self {
            loading: false,
            identity: Some(user.id),
            user: Some(user),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

pub struct AuthContext<S> {
    source: S,
    state: watch::Sender<AuthSnapshot>,
    /// Held for the duration of a fetch; at most one is in flight.
    in_flight: Mutex<()>,
    /// Bumped when a fetch publishes its result.
    completed: AtomicU64,
    /// Bumped on logout and login; a fetch that started before either is
    /// discarded.
    epoch: AtomicU64,
}

impl<S: IdentitySource> AuthContext<S> {
    /// New context in the loading state. Call [`resolve`](Self::resolve) to
    /// load the identity.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::loading());
        Self {
            source,
            state,
            in_flight: Mutex::new(()),
            completed: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current state.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Fetch the identity and publish it.
    ///
    /// Callers that arrive while a fetch is in flight wait for it and get its
    /// result instead of starting another one. A failed fetch is published
    /// as signed out.
    pub async fn resolve(&self) -> AuthSnapshot {
        self.fetch_and_publish(false).await
    }

    /// With `force`, always make a fresh round trip instead of sharing a
    /// fetch that was already in flight.
    async fn fetch_and_publish(&self, force: bool) -> AuthSnapshot {
        let seen = self.completed.load(Ordering::SeqCst);
        let arrived = self.epoch.load(Ordering::SeqCst);
        let _guard = self.in_flight.lock().await;
        if !force
            && self.completed.load(Ordering::SeqCst) != seen
            && self.epoch.load(Ordering::SeqCst) == arrived
        {
            return self.snapshot();
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let next = match self.source.fetch_identity().await {
            Ok(Some(user)) => AuthSnapshot::signed_in(user),
            Ok(None) => AuthSnapshot::signed_out(),
            Err(e) => {
                tracing::warn!(error = %e, "Identity fetch failed; treating as signed out");
                AuthSnapshot::signed_out()
            }
        };

        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.state.send_replace(next);
        } else {
            tracing::debug!("Discarding identity fetched before logout or login");
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.snapshot()
    }

    /// Clear local state, then ask the server to clear the cookie.
    ///
    /// Subscribers see the signed-out state before the server is contacted.
    /// A failed server call is logged and otherwise ignored.
    pub async fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(AuthSnapshot::signed_out());

        if let Err(e) = self.source.logout().await {
            tracing::warn!(error = %e, "Server logout failed");
        }
    }

    /// Re-resolve after the external login flow finished.
    ///
    /// Always asks the server again. A fetch still in flight from before the
    /// login is discarded.
    pub async fn login_completed(&self) -> AuthSnapshot {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.fetch_and_publish(true).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use chrono::Utc;
    use columbia_core::roles::Role;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::ClientError;

    fn user(id: DbId, role: Role) -> UserRecord {
        UserRecord {
            id,
            role,
            display_name: "Alice".to_string(),
            platform_id: "alice".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Scripted identity source.
    struct FakeSource {
        user: std::sync::Mutex<Option<UserRecord>>,
        fail: bool,
        fetches: AtomicUsize,
        logouts: AtomicUsize,
        /// When set, the first fetch waits for a notification before
        /// answering.
        gate: Option<Notify>,
    }

    impl FakeSource {
        fn new(user: Option<UserRecord>) -> Self {
            Self {
                user: std::sync::Mutex::new(user),
                fail: false,
                fetches: AtomicUsize::new(0),
                logouts: AtomicUsize::new(0),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl IdentitySource for FakeSource {
        async fn fetch_identity(&self) -> Result<Option<UserRecord>, ClientError> {
            let previous = self.fetches.fetch_add(1, Ordering::SeqCst);
            // Answer with the state at request time, like a real server.
            let answer = self.user.lock().unwrap().clone();
            if let (Some(gate), 0) = (&self.gate, previous) {
                gate.notified().await;
            }
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            if self.fail {
                return Err(ClientError::UnexpectedStatus(502));
            }
            Ok(answer)
        }

        async fn logout(&self) -> Result<(), ClientError> {
            self.logouts.fetch_add(1, Ordering::SeqCst);
            *self.user.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn starts_loading() {
        let ctx = AuthContext::new(FakeSource::new(None));
        assert_eq!(ctx.snapshot(), AuthSnapshot::loading());
    }

    #[tokio::test]
    async fn resolve_publishes_user() {
        let ctx = AuthContext::new(FakeSource::new(Some(user(7, Role::Admin))));
        let snap = ctx.resolve().await;
        assert!(!snap.loading);
        assert_eq!(snap.identity, Some(7));
        assert_eq!(snap.user.unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn failed_fetch_means_signed_out() {
        let mut source = FakeSource::new(Some(user(7, Role::User)));
        source.fail = true;
        let ctx = AuthContext::new(source);
        assert_eq!(ctx.resolve().await, AuthSnapshot::signed_out());
    }

    #[tokio::test]
    async fn concurrent_resolves_share_one_fetch() {
        let ctx = AuthContext::new(FakeSource::new(Some(user(7, Role::User))));
        let (a, b, c) = tokio::join!(ctx.resolve(), ctx.resolve(), ctx.resolve());
        assert_eq!(ctx.source().fetches.load(Ordering::SeqCst), 1);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a.is_signed_in());
    }

    #[tokio::test]
    async fn sequential_resolves_fetch_again() {
        let ctx = AuthContext::new(FakeSource::new(None));
        ctx.resolve().await;
        ctx.resolve().await;
        assert_eq!(ctx.source().fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn logout_clears_before_server_call() {
        let ctx = AuthContext::new(FakeSource::new(Some(user(7, Role::User))));
        ctx.resolve().await;
        let mut rx = ctx.subscribe();

        ctx.logout().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), AuthSnapshot::signed_out());
        assert_eq!(ctx.source().logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_started_before_logout_is_discarded() {
        let mut source = FakeSource::new(Some(user(7, Role::User)));
        source.gate = Some(Notify::new());
        let ctx = AuthContext::new(source);

        let resolving = ctx.resolve();
        let logging_out = async {
            // Let the fetch start and park on the gate first.
            tokio::task::yield_now().await;
            ctx.logout().await;
            ctx.source().gate.as_ref().unwrap().notify_one();
        };
        let (snap, ()) = tokio::join!(resolving, logging_out);

        assert_eq!(snap, AuthSnapshot::signed_out());
        assert_eq!(ctx.snapshot(), AuthSnapshot::signed_out());
    }

    #[tokio::test]
    async fn login_during_startup_fetch_fetches_again() {
        let mut source = FakeSource::new(None);
        source.gate = Some(Notify::new());
        let ctx = AuthContext::new(source);

        let startup = ctx.resolve();
        let login = async {
            // The startup fetch has already read "no session" and is parked.
            tokio::task::yield_now().await;
            *ctx.source().user.lock().unwrap() = Some(user(9, Role::User));
            ctx.login_completed().await
        };
        let release = async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            ctx.source().gate.as_ref().unwrap().notify_one();
        };
        let (_, after_login, ()) = tokio::join!(startup, login, release);

        assert_eq!(after_login.identity, Some(9));
        assert_eq!(ctx.snapshot().identity, Some(9));
        assert_eq!(ctx.source().fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn login_completed_re_resolves() {
        let ctx = AuthContext::new(FakeSource::new(None));
        assert!(!ctx.resolve().await.is_signed_in());

        *ctx.source().user.lock().unwrap() = Some(user(9, Role::User));
        let snap = ctx.login_completed().await;
        assert_eq!(snap.identity, Some(9));
    }
}
