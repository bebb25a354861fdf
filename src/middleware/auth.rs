//! Session extractors for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};

use crate::errors::AppError;
use crate::models::session::SessionContext;
use crate::models::user::UserRole;
use crate::services::session as session_service;
use crate::AppState;

/// Name of the cookie carrying the identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Removal counterpart of the session cookie, with the same scope and flags.
pub fn expired_token_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE)
        .path("/")
        .secure(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Token from the `token` cookie, falling back to an `Authorization: Bearer`
/// header for non-browser clients.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Resolved session for the request, possibly anonymous.
///
/// Reuses the context the session guard stored on the request; otherwise
/// resolves it once and caches it in the request extensions.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<SessionContext>() {
            return Ok(Session(ctx.clone()));
        }
        let token = session_token(&parts.headers);
        let ctx = session_service::resolve(&state.identity, token).await;
        parts.extensions.insert(ctx.clone());
        Ok(Session(ctx))
    }
}

/// Signed-in member extracted from the resolved session.
///
/// Use as an Axum extractor in handlers that require a signed-in member:
/// ```ignore
/// async fn handler(member: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub role: UserRole,
    pub email: String,
    pub name: String,
}

impl CurrentUser {
    fn from_session(ctx: &SessionContext) -> Result<Self, AppError> {
        let role = ctx.role().ok_or(AppError::Unauthorized)?;
        let user = ctx.user.as_ref().ok_or(AppError::Unauthorized)?;
        let email = user
            .email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or(AppError::Unauthorized)?;
        let name = user.display_name().unwrap_or_else(|| email.clone());
        Ok(Self { role, email, name })
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Session(ctx) = Session::from_request_parts(parts, state).await?;
        CurrentUser::from_session(&ctx)
    }
}
