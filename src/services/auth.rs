//! Sign-in, registration and password recovery against the identity service.
//!
//! The identity service owns credentials. This module shapes the requests,
//! runs the local form rules first, and turns identity answers into the
//! messages the forms show.

use crate::errors::AppError;
use crate::models::auth::{
    AckResponse, AuthResponse, ForgotPasswordRequest, JoinForm, LoginRequest, Navigate,
    RegisterRequest, ResetPasswordRequest, SignedIn, MSG_INVALID_CREDENTIALS, MSG_USER_EXISTS,
    MSG_USER_NOT_FOUND,
};
use crate::services::identity::IdentityClient;
use crate::services::session::LOGIN_PATH;
use crate::services::validation;

const LOGIN_FAILED: &str = "An error occurred. Please try again.";
const REGISTER_FAILED: &str = "An error occurred.";
const LOGGED_IN: &str = "Logged in successfully.";
const REGISTERED: &str = "Congratulations! You are now a user of WriteVerse!";
const PASSWORD_RESET: &str =
    "Your password has been reset successfully. You can now log in with your new password.";

/// Token to store in the session cookie plus what the browser is told.
#[derive(Debug, Clone)]
pub struct Issued {
    pub token: String,
    pub signed_in: SignedIn,
}

/// Accept a successful login/register answer, or `None` when it is unusable.
fn issue(response: AuthResponse, message: &'static str) -> Option<Issued> {
    if !response.ok {
        return None;
    }
    let token = response.token.filter(|t| !t.is_empty())?;
    let role = response.user_role?;
    Some(Issued {
        token,
        signed_in: SignedIn {
            role,
            redirect_to: role.home(),
            message,
        },
    })
}

fn login_error(message: Option<&str>) -> AppError {
    match message {
        Some(MSG_USER_NOT_FOUND) => {
            AppError::NotFound("User not found with this email address.".to_string())
        }
        Some(MSG_INVALID_CREDENTIALS) => AppError::InvalidCredentials,
        _ => AppError::Upstream(LOGIN_FAILED.to_string()),
    }
}

fn register_error(message: Option<&str>) -> AppError {
    match message {
        Some(MSG_USER_EXISTS) => {
            AppError::Conflict("User already exists with this email address.".to_string())
        }
        _ => AppError::Upstream(REGISTER_FAILED.to_string()),
    }
}

fn rejected(ack: AckResponse, fallback: &str) -> AppError {
    AppError::Rejected(ack.message.unwrap_or_else(|| fallback.to_string()))
}

pub async fn login(identity: &IdentityClient, form: LoginRequest) -> Result<Issued, AppError> {
    let body = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    let response = identity.login(&body).await.map_err(|e| {
        tracing::warn!(error = %e, "Login request failed");
        AppError::Upstream(LOGIN_FAILED.to_string())
    })?;

    let message = response.message.clone();
    match issue(response, LOGGED_IN) {
        Some(issued) => {
            tracing::info!(role = ?issued.signed_in.role, "User logged in");
            Ok(issued)
        }
        None => Err(login_error(message.as_deref())),
    }
}

/// Check the password rules locally, then register with the identity service.
pub async fn register(identity: &IdentityClient, form: JoinForm) -> Result<Issued, AppError> {
    validation::validate_new_password(&form.password, &form.confirm_password).into_result()?;

    let body = RegisterRequest {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password,
    };
    let response = identity.register(&body).await.map_err(|e| {
        tracing::warn!(error = %e, "Registration request failed");
        AppError::Upstream(REGISTER_FAILED.to_string())
    })?;

    let message = response.message.clone();
    match issue(response, REGISTERED) {
        Some(issued) => {
            tracing::info!(role = ?issued.signed_in.role, "User registered");
            Ok(issued)
        }
        None => Err(register_error(message.as_deref())),
    }
}

pub async fn forgot_password(
    identity: &IdentityClient,
    form: ForgotPasswordRequest,
) -> Result<Navigate, AppError> {
    let email = form.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::Validation("Please enter your email address.".to_string()));
    }
    let ack = identity
        .forgot_password(&ForgotPasswordRequest {
            email: email.clone(),
        })
        .await?;
    if !ack.ok {
        return Err(rejected(ack, "Could not send the reset link."));
    }
    Ok(Navigate {
        redirect_to: LOGIN_PATH,
        message: format!("We've sent a password reset link to {email}"),
    })
}

/// Check the new password locally, then hand it to the identity service.
pub async fn reset_password(
    identity: &IdentityClient,
    token: &str,
    form: ResetPasswordRequest,
) -> Result<Navigate, AppError> {
    if token.trim().is_empty() {
        return Err(AppError::Validation("Reset token is missing.".to_string()));
    }
    validation::validate_new_password(&form.new_password, &form.re_typed_password)
        .into_result()?;

    let ack = identity.reset_password(token, &form).await?;
    if !ack.ok {
        return Err(rejected(ack, "Password reset failed."));
    }
    tracing::info!("Password reset");
    Ok(Navigate {
        redirect_to: LOGIN_PATH,
        message: PASSWORD_RESET.to_string(),
    })
}
