//! Public announcement routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::announcement::Announcement;
use crate::models::pagination::{PageWindow, Pagination};
use crate::services::announcements::{
    self as announcement_service, AnnouncementFilters, ANNOUNCEMENTS_PER_PAGE,
};
use crate::AppState;

/// GET /announcements
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<AnnouncementFilters>,
) -> Result<Json<ApiResponse<PageWindow<Announcement>>>, AppError> {
    let result =
        announcement_service::list(&state.store, &filters, &pagination, ANNOUNCEMENTS_PER_PAGE)
            .await?;
    Ok(ApiResponse::success(result))
}

/// GET /announcements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Announcement>>, AppError> {
    let announcement = announcement_service::find(&state.store, id).await?;
    Ok(ApiResponse::success(announcement))
}
