//! Access guard for protected views.
//!
//! [`evaluate`] is a pure transition function from the current auth view and
//! an [`AccessRequirement`] to a [`GuardState`]. Callers re-run it whenever the
//! auth view or the requirement changes; there is no terminal state.

use serde::{Deserialize, Serialize};

use crate::roles::{can_access, Role};

/// Default redirect target for visitors without a session.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default landing page for authenticated users who lack the required role.
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";

/// Minimum role a view requires, plus where to send visitors who fail it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    pub required_role: Role,
    /// Where unauthenticated visitors go.
    pub redirect_to: String,
    /// Where authenticated but under-privileged users go.
    pub landing: String,
}

impl Default for AccessRequirement {
    fn default() -> Self {
        Self {
            required_role: Role::User,
            redirect_to: DEFAULT_LOGIN_PATH.to_string(),
            landing: DEFAULT_LANDING_PATH.to_string(),
        }
    }
}

impl AccessRequirement {
    pub fn role(required_role: Role) -> Self {
        Self {
            required_role,
            ..Self::default()
        }
    }

    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = redirect_to.into();
        self
    }

    pub fn with_landing(mut self, landing: impl Into<String>) -> Self {
        self.landing = landing.into();
        self
    }
}

/// What the guard knows about the current visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    /// The identity lookup has not finished yet.
    Loading,
    /// Lookup finished; no session.
    Anonymous,
    /// Lookup finished; the stored role of the signed-in user.
    SignedIn(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Unauthorized,
    Authorized,
}

/// What the view layer should do for a given [`GuardState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    ShowLoading,
    Redirect(String),
    Render,
}

pub fn evaluate(view: AuthView, requirement: &AccessRequirement) -> GuardState {
    match view {
        AuthView::Loading => GuardState::Loading,
        AuthView::Anonymous => GuardState::Unauthenticated,
        AuthView::SignedIn(role) if can_access(role, requirement.required_role) => {
            GuardState::Authorized
        }
        AuthView::SignedIn(_) => GuardState::Unauthorized,
    }
}

impl GuardState {
    pub fn action(self, requirement: &AccessRequirement) -> GuardAction {
        match self {
            Self::Loading => GuardAction::ShowLoading,
            Self::Unauthenticated => GuardAction::Redirect(requirement.redirect_to.clone()),
            Self::Unauthorized => GuardAction::Redirect(requirement.landing.clone()),
            Self::Authorized => GuardAction::Render,
        }
    }

    /// Only the authorized state renders the protected content.
    pub fn renders_children(self) -> bool {
        self == Self::Authorized
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn loading_shows_indicator_without_redirect() {
        let req = AccessRequirement::role(Role::Admin);
        let state = evaluate(AuthView::Loading, &req);
        assert_eq!(state, GuardState::Loading);
        assert_eq!(state.action(&req), GuardAction::ShowLoading);
        assert!(!state.renders_children());
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        let req = AccessRequirement::default();
        let state = evaluate(AuthView::Anonymous, &req);
        assert_eq!(state, GuardState::Unauthenticated);
        assert_matches!(state.action(&req), GuardAction::Redirect(path) if path == "/login");
    }

    #[test]
    fn user_on_admin_page_is_sent_to_dashboard() {
        let req = AccessRequirement::role(Role::Admin);
        let state = evaluate(AuthView::SignedIn(Role::User), &req);
        assert_eq!(state, GuardState::Unauthorized);
        assert_matches!(state.action(&req), GuardAction::Redirect(path) if path == "/dashboard");
        assert!(!state.renders_children());
    }

    #[test]
    fn default_requirement_admits_any_signed_in_role() {
        let req = AccessRequirement::default();
        for role in Role::ALL {
            let state = evaluate(AuthView::SignedIn(role), &req);
            assert_eq!(state.action(&req), GuardAction::Render, "role {role}");
        }
    }

    #[test]
    fn admin_reaches_admin_page() {
        let req = AccessRequirement::role(Role::Admin);
        assert_eq!(
            evaluate(AuthView::SignedIn(Role::Admin), &req),
            GuardState::Authorized
        );
    }

    #[test]
    fn custom_redirect_targets_are_honoured() {
        let req = AccessRequirement::role(Role::Admin)
            .with_redirect("/signin")
            .with_landing("/home");
        assert_eq!(
            evaluate(AuthView::Anonymous, &req).action(&req),
            GuardAction::Redirect("/signin".into())
        );
        assert_eq!(
            evaluate(AuthView::SignedIn(Role::User), &req).action(&req),
            GuardAction::Redirect("/home".into())
        );
    }

    #[test]
    fn re_evaluation_after_logout_redirects() {
        let req = AccessRequirement::default();
        let before = evaluate(AuthView::SignedIn(Role::User), &req);
        let after = evaluate(AuthView::Anonymous, &req);
        assert_eq!(before, GuardState::Authorized);
        assert_eq!(after, GuardState::Unauthenticated);
    }
}
