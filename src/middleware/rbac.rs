//! Role-based access control extractors for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

fn require(user: CurrentUser, role: UserRole, message: &str) -> Result<CurrentUser, AppError> {
    if user.role != role {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(user)
}

/// Extractor that requires the `user` role.
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require(user, UserRole::User, "Member access required").map(RequireUser)
    }
}

/// Extractor that requires the `admin` role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require(user, UserRole::Admin, "Admin access required").map(RequireAdmin)
    }
}
