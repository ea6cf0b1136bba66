//! Reactive route guard over an [`AuthContext`](crate::AuthContext).

use columbia_core::guard::{evaluate, AccessRequirement, AuthView, GuardAction, GuardState};
use tokio::sync::watch;

use crate::context::AuthSnapshot;

impl From<&AuthSnapshot> for AuthView {
    fn from(snapshot: &AuthSnapshot) -> Self {
        match (&snapshot.user, snapshot.loading) {
            (_, true) => AuthView::Loading,
            (Some(user), false) => AuthView::SignedIn(user.role),
            (None, false) => AuthView::Anonymous,
        }
    }
}

/// A view gated on an [`AccessRequirement`].
///
/// Re-evaluates against the latest auth state every time it is asked, and
/// [`changed`](Self::changed) waits for the next auth state change.
pub struct ProtectedRoute {
    requirement: AccessRequirement,
    auth: watch::Receiver<AuthSnapshot>,
}

impl ProtectedRoute {
    pub fn new(requirement: AccessRequirement, auth: watch::Receiver<AuthSnapshot>) -> Self {
        Self { requirement, auth }
    }

    pub fn state(&self) -> GuardState {
        evaluate(AuthView::from(&*self.auth.borrow()), &self.requirement)
    }

    pub fn action(&self) -> GuardAction {
        self.state().action(&self.requirement)
    }

    /// Wait for the auth state to change and return the new guard state.
    ///
    /// Returns `None` once the auth context is gone.
    pub async fn changed(&mut self) -> Option<GuardState> {
        self.auth.changed().await.ok()?;
        let view = AuthView::from(&*self.auth.borrow_and_update());
        Some(evaluate(view, &self.requirement))
    }
}
