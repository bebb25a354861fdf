//! Request and response bodies exchanged with the identity service.

use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

/// Identity message meaning the account behind a token no longer exists.
pub const MSG_USER_NOT_FOUND: &str = "User not found";
/// Identity message meaning the token itself was rejected.
pub const MSG_INVALID_TOKEN: &str = "Invalid token";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_USER_EXISTS: &str = "User already exists";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration form as submitted by the browser, including confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration body forwarded to the identity service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub re_typed_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordQuery {
    pub token: String,
}

/// Identity user as returned by `GET /api/auth/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    pub role: UserRole,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl IdentityUser {
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub ok: bool,
    #[serde(default)]
    pub user: Option<IdentityUser>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CurrentUserResponse {
    /// True when the identity service disowns the token, so it must be dropped.
    pub fn token_rejected(&self) -> bool {
        matches!(
            self.message.as_deref(),
            Some(MSG_USER_NOT_FOUND) | Some(MSG_INVALID_TOKEN)
        )
    }
}

/// Response shape shared by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_role: Option<UserRole>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain acknowledgement from forgot/reset password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a successful sign-in or registration, returned to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    pub role: UserRole,
    pub redirect_to: &'static str,
    pub message: &'static str,
}

/// Where the browser should go next after a form action.
#[derive(Debug, Clone, Serialize)]
pub struct Navigate {
    pub redirect_to: &'static str,
    pub message: String,
}
