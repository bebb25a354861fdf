//! Member routes: own posts, publishing and profile.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireUser;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::post::{Author, CreatePost, Post, PostSummary};
use crate::models::user::Profile;
use crate::services::posts::{self as post_service, UserPostFilters};
use crate::services::profile as profile_service;
use crate::AppState;

/// GET /user/posts: the caller's posts, drafts included.
pub async fn posts(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<UserPostFilters>,
) -> Result<Json<ApiResponse<PageWindow<PostSummary>>>, AppError> {
    let result =
        post_service::list_for_author(&state.store, &member.email, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /user/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    post_service::delete_own(&state.store, id, &member.email).await?;
    Ok(ApiResponse::success("Post deleted successfully"))
}

/// POST /user/publish
pub async fn publish(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
    Json(body): Json<CreatePost>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let author = Author {
        name: member.name,
        email: member.email,
    };
    let post = post_service::publish(&state.store, author, &body).await?;
    Ok(ApiResponse::success(post))
}

/// GET /user/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
) -> Json<ApiResponse<Profile>> {
    let profile = profile_service::get(&state.store, &member.email, Some(member.name.as_str())).await;
    ApiResponse::success(profile)
}

/// PUT /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(member): RequireUser,
    Json(body): Json<Profile>,
) -> Result<Json<ApiResponse<Profile>>, AppError> {
    let profile = profile_service::update(&state.store, &member.email, body).await?;
    Ok(ApiResponse::success(profile))
}
