//! Authentication routes: form descriptors, login, join, password recovery,
//! logout and the session lookup.

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::{expired_token_cookie, Session, TOKEN_COOKIE};
use crate::models::auth::{
    ForgotPasswordRequest, JoinForm, LoginRequest, Navigate, ResetPasswordQuery,
    ResetPasswordRequest, SignedIn,
};
use crate::models::session::SessionContext;
use crate::services::auth as auth_service;
use crate::AppState;

/// What a sign-in page shows and where it submits.
#[derive(Debug, Serialize)]
pub struct FormDescriptor {
    pub title: &'static str,
    pub description: &'static str,
    pub submit: &'static str,
}

fn session_cookie(token: String, max_age_days: i64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .max_age(time::Duration::days(max_age_days))
        .secure(true)
        .same_site(SameSite::Strict)
        .build()
}

/// GET /login
pub async fn login_form() -> Json<ApiResponse<FormDescriptor>> {
    ApiResponse::success(FormDescriptor {
        title: "Welcome back",
        description: "Sign in to your WriteVerse account",
        submit: "/login",
    })
}

/// GET /join
pub async fn join_form() -> Json<ApiResponse<FormDescriptor>> {
    ApiResponse::success(FormDescriptor {
        title: "Join WriteVerse",
        description: "Create an account to start writing and joining discussions",
        submit: "/join",
    })
}

/// GET /reset-password
pub async fn reset_form() -> Json<ApiResponse<FormDescriptor>> {
    ApiResponse::success(FormDescriptor {
        title: "Reset your password",
        description: "Enter a new password for your account",
        submit: "/reset-password",
    })
}

/// POST /login: sets the session cookie on success.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SignedIn>>), AppError> {
    let issued = auth_service::login(&state.identity, body).await?;
    let jar = jar.add(session_cookie(
        issued.token,
        state.config.session_cookie_max_age_days,
    ));
    Ok((jar, ApiResponse::success(issued.signed_in)))
}

/// POST /join: registers and signs in.
pub async fn join(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<JoinForm>,
) -> Result<(CookieJar, Json<ApiResponse<SignedIn>>), AppError> {
    let issued = auth_service::register(&state.identity, body).await?;
    let jar = jar.add(session_cookie(
        issued.token,
        state.config.session_cookie_max_age_days,
    ));
    Ok((jar, ApiResponse::success(issued.signed_in)))
}

/// POST /forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<Navigate>>, AppError> {
    let next = auth_service::forgot_password(&state.identity, body).await?;
    Ok(ApiResponse::success(next))
}

/// PUT /reset-password?token=
pub async fn reset_password(
    State(state): State<AppState>,
    Query(query): Query<ResetPasswordQuery>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<Navigate>>, AppError> {
    let next = auth_service::reset_password(&state.identity, &query.token, body).await?;
    Ok(ApiResponse::success(next))
}

/// POST /logout: drops the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<Navigate>>) {
    let jar = jar.remove(expired_token_cookie());
    (
        jar,
        ApiResponse::success(Navigate {
            redirect_to: "/",
            message: "Logged out successfully.".to_string(),
        }),
    )
}

/// GET /api/session: the resolved session for the rendering client.
pub async fn session(
    jar: CookieJar,
    Session(ctx): Session,
) -> (CookieJar, Json<ApiResponse<SessionContext>>) {
    let jar = if ctx.clears_token() {
        jar.remove(expired_token_cookie())
    } else {
        jar
    };
    (jar, ApiResponse::success(ctx))
}
