//! Per-request session state and the context handed to handlers.

use serde::Serialize;

use crate::models::auth::IdentityUser;
use crate::models::user::UserRole;

/// Authentication state of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    PendingVerification,
    AuthenticatedUser,
    AuthenticatedAdmin,
    InvalidToken,
}

impl SessionState {
    pub fn role(self) -> Option<UserRole> {
        match self {
            SessionState::AuthenticatedUser => Some(UserRole::User),
            SessionState::AuthenticatedAdmin => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::User => SessionState::AuthenticatedUser,
            UserRole::Admin => SessionState::AuthenticatedAdmin,
        }
    }
}

/// Resolved session, stored as a request extension so downstream handlers
/// never consult the identity service a second time.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub state: SessionState,
    #[serde(skip)]
    pub token: Option<String>,
    pub user: Option<IdentityUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
            token: None,
            user: None,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.state.role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.role().is_some()
    }

    /// Whether the response must clear the client's token cookie.
    pub fn clears_token(&self) -> bool {
        self.state == SessionState::InvalidToken
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}
