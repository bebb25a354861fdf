//! Admin routes: members, moderation queue and announcements.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::announcement::{Announcement, CreateAnnouncement};
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::report::Report;
use crate::models::user::{UpdateUserAccount, UserAccount};
use crate::services::accounts::{self as account_service, AccountFilters};
use crate::services::announcements::{
    self as announcement_service, AnnouncementFilters, ADMIN_ANNOUNCEMENTS_PER_PAGE,
};
use crate::services::reports::{self as report_service, ReportFilters};
use crate::AppState;

/// GET /admin/users
pub async fn users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<AccountFilters>,
) -> Result<Json<ApiResponse<PageWindow<UserAccount>>>, AppError> {
    let result = account_service::list(&state.store, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// PUT /admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<u64>,
    Json(body): Json<UpdateUserAccount>,
) -> Result<Json<ApiResponse<UserAccount>>, AppError> {
    let account = account_service::update(&state.store, id, &body).await?;
    Ok(ApiResponse::success(account))
}

/// GET /admin/reports
pub async fn reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<ReportFilters>,
) -> Result<Json<ApiResponse<PageWindow<Report>>>, AppError> {
    let result = report_service::list(&state.store, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /admin/reports/{id}/resolve
pub async fn resolve_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let report = report_service::resolve(&state.store, id).await?;
    Ok(ApiResponse::success(report))
}

/// POST /admin/reports/{id}/dismiss
pub async fn dismiss_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let report = report_service::dismiss(&state.store, id).await?;
    Ok(ApiResponse::success(report))
}

/// GET /admin/announcements
pub async fn announcements(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<AnnouncementFilters>,
) -> Result<Json<ApiResponse<PageWindow<Announcement>>>, AppError> {
    let result = announcement_service::list(
        &state.store,
        &filters,
        &pagination,
        ADMIN_ANNOUNCEMENTS_PER_PAGE,
    )
    .await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /admin/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    announcement_service::delete(&state.store, id).await?;
    Ok(ApiResponse::success("Announcement deleted successfully"))
}

/// POST /admin/publish-announcement
pub async fn publish_announcement(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateAnnouncement>,
) -> Result<Json<ApiResponse<Announcement>>, AppError> {
    let announcement = announcement_service::publish(&state.store, &body).await?;
    Ok(ApiResponse::success(announcement))
}
