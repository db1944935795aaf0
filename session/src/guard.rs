//! Route guards driven by the published authentication state.

use crate::state::AuthSnapshot;

/// Path private routes redirect to when there is no session.
pub const LOGIN_ROUTE: &str = "/login";

/// Path public routes redirect to when a session exists.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Who may visit a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires an authenticated session
    Private,
    /// Only for visitors without a session (login, registration)
    Public,
}

/// What the router should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the route
    Proceed,
    /// Navigate elsewhere
    Redirect(&'static str),
    /// Initial load still running; render nothing yet
    Pending,
}

impl RouteAccess {
    /// Decide how to handle a visit given the current state.
    #[must_use]
    pub const fn decide(self, snapshot: &AuthSnapshot) -> GuardDecision {
        if snapshot.initializing {
            return GuardDecision::Pending;
        }
        match (self, snapshot.authenticated) {
            (Self::Private, false) => GuardDecision::Redirect(LOGIN_ROUTE),
            (Self::Public, true) => GuardDecision::Redirect(DASHBOARD_ROUTE),
            _ => GuardDecision::Proceed,
        }
    }
}
