//! Public post routes: browsing, votes, comments and reports.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::post::{Comment, CreateComment, PostDetail, PostSummary, VoteRequest, VoteTally};
use crate::models::report::{CreateReport, Report};
use crate::services::posts::{self as post_service, PostFilters};
use crate::AppState;

/// GET /posts: published posts with search, category, sort and paging.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<PostFilters>,
) -> Result<Json<ApiResponse<PageWindow<PostSummary>>>, AppError> {
    let result = post_service::list(&state.store, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<PostDetail>>, AppError> {
    let detail = post_service::find(&state.store, id).await?;
    Ok(ApiResponse::success(detail))
}

/// POST /posts/{id}/vote
pub async fn vote(
    State(state): State<AppState>,
    member: CurrentUser,
    Path(id): Path<u64>,
    Json(body): Json<VoteRequest>,
) -> Result<Json<ApiResponse<VoteTally>>, AppError> {
    let tally = post_service::vote(&state.store, id, &member.email, body.vote).await?;
    Ok(ApiResponse::success(tally))
}

/// POST /posts/{id}/comments
pub async fn comment(
    State(state): State<AppState>,
    member: CurrentUser,
    Path(id): Path<u64>,
    Json(body): Json<CreateComment>,
) -> Result<Json<ApiResponse<Comment>>, AppError> {
    let comment = post_service::add_comment(&state.store, id, &member.name, &body.content).await?;
    Ok(ApiResponse::success(comment))
}

/// POST /posts/{id}/report
pub async fn report(
    State(state): State<AppState>,
    member: CurrentUser,
    Path(id): Path<u64>,
    Json(body): Json<CreateReport>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let report = post_service::report(&state.store, id, &member.name, &body.reason).await?;
    Ok(ApiResponse::success(report))
}
