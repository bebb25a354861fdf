//! Session resolution and the guard's routing decision.
//!
//! A request starts `Anonymous`, moves to `PendingVerification` when it
//! carries a token, and settles after a single identity lookup. The decision
//! table in [`decide`] then maps the settled state and the requested path to
//! allow or redirect.

use crate::models::auth::{CurrentUserResponse, IdentityUser};
use crate::models::session::{SessionContext, SessionState};
use crate::services::identity::{IdentityClient, IdentityError};

pub const LOGIN_PATH: &str = "/login";
pub const USER_DASHBOARD: &str = "/user/dashboard";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

/// Pages only meaningful to signed-out visitors.
pub const AUTH_ENTRY_PATHS: [&str; 3] = ["/login", "/join", "/reset-password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    AuthEntry,
    UserDashboard,
    AdminDashboard,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

fn in_subtree(path: &str, root: &str) -> bool {
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn classify(path: &str) -> RouteClass {
    if AUTH_ENTRY_PATHS.contains(&path) {
        RouteClass::AuthEntry
    } else if in_subtree(path, USER_DASHBOARD) {
        RouteClass::UserDashboard
    } else if in_subtree(path, ADMIN_DASHBOARD) {
        RouteClass::AdminDashboard
    } else {
        RouteClass::Other
    }
}

/// Initial state from the presence of a token.
pub fn begin(token: Option<&str>) -> SessionState {
    match token {
        Some(t) if !t.is_empty() => SessionState::PendingVerification,
        _ => SessionState::Anonymous,
    }
}

/// Settle a pending session from the identity lookup outcome.
///
/// Transport failures and malformed bodies fall back to `Anonymous`.
pub fn verify(
    outcome: Result<CurrentUserResponse, IdentityError>,
) -> (SessionState, Option<IdentityUser>) {
    match outcome {
        Ok(body) if body.ok => match body.user {
            Some(user) => (SessionState::for_role(user.role), Some(user)),
            None => (SessionState::Anonymous, None),
        },
        Ok(body) if body.token_rejected() => (SessionState::InvalidToken, None),
        Ok(_) => (SessionState::Anonymous, None),
        Err(_) => (SessionState::Anonymous, None),
    }
}

/// Routing decision for a settled session on `path`.
pub fn decide(state: SessionState, path: &str) -> GuardDecision {
    let class = classify(path);
    match state.role() {
        None => match class {
            RouteClass::UserDashboard | RouteClass::AdminDashboard => {
                GuardDecision::Redirect(LOGIN_PATH)
            }
            _ => GuardDecision::Allow,
        },
        Some(role) => match (state, class) {
            (_, RouteClass::AuthEntry) => GuardDecision::Redirect(role.home()),
            (SessionState::AuthenticatedUser, RouteClass::AdminDashboard) => {
                GuardDecision::Redirect(USER_DASHBOARD)
            }
            (SessionState::AuthenticatedAdmin, RouteClass::UserDashboard) => {
                GuardDecision::Redirect(ADMIN_DASHBOARD)
            }
            _ => GuardDecision::Allow,
        },
    }
}

/// Resolve the session for a request, calling the identity service only
/// when a token is present.
pub async fn resolve(identity: &IdentityClient, token: Option<String>) -> SessionContext {
    let pending = token.filter(|t| begin(Some(t)) == SessionState::PendingVerification);
    let Some(token) = pending else {
        return SessionContext::anonymous();
    };

    let outcome = identity.current_user(&token).await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "Identity lookup failed, treating session as anonymous");
    }
    let (state, user) = verify(outcome);
    tracing::debug!(state = ?state, "Session resolved");

    SessionContext {
        state,
        token: Some(token),
        user,
    }
}
