//! Home page and dashboard overview routes.

use axum::{extract::State, Json};

use crate::errors::ApiResponse;
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::services::dashboard::{self as dashboard_service, AdminDashboard, HomeSummary, UserDashboard};
use crate::AppState;

/// GET /
pub async fn home(State(state): State<AppState>) -> Json<ApiResponse<HomeSummary>> {
    ApiResponse::success(dashboard_service::home(&state.store).await)
}

/// GET /user/dashboard
pub async fn user(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
) -> Json<ApiResponse<UserDashboard>> {
    ApiResponse::success(dashboard_service::user(&state.store, &member.email).await)
}

/// GET /admin/dashboard
pub async fn admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<AdminDashboard>> {
    ApiResponse::success(dashboard_service::admin(&state.store).await)
}
