//! Route definitions for the WriteVerse API.

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod posts;
pub mod user;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::middleware::guard::session_guard;
use crate::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

fn cors(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url, "Invalid FRONTEND_URL, CORS origin not set");
            layer
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let frontend_url = state.config.frontend_url.clone();

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        // Auth
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/join", get(auth::join_form).post(auth::join))
        .route(
            "/reset-password",
            get(auth::reset_form).put(auth::reset_password),
        )
        .route("/forgot-password", post(auth::forgot_password))
        .route("/logout", post(auth::logout))
        .route("/api/session", get(auth::session))
        // Public screens
        .route("/", get(dashboard::home))
        .route("/posts", get(posts::list))
        .route("/posts/{id}", get(posts::get_by_id))
        .route("/posts/{id}/vote", post(posts::vote))
        .route("/posts/{id}/comments", post(posts::comment))
        .route("/posts/{id}/report", post(posts::report))
        .route("/announcements", get(announcements::list))
        .route("/announcements/{id}", get(announcements::get_by_id))
        // Member screens
        .route("/user/dashboard", get(dashboard::user))
        .route("/user/posts", get(user::posts))
        .route("/user/posts/{id}", delete(user::delete_post))
        .route("/user/publish", post(user::publish))
        .route("/user/profile", get(user::profile).put(user::update_profile))
        // Admin screens
        .route("/admin/dashboard", get(dashboard::admin))
        .route("/admin/users", get(admin::users))
        .route("/admin/users/{id}", put(admin::update_user))
        .route("/admin/reports", get(admin::reports))
        .route("/admin/reports/{id}/resolve", post(admin::resolve_report))
        .route("/admin/reports/{id}/dismiss", post(admin::dismiss_report))
        .route("/admin/announcements", get(admin::announcements))
        .route(
            "/admin/announcements/{id}",
            delete(admin::delete_announcement),
        )
        .route(
            "/admin/publish-announcement",
            post(admin::publish_announcement),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors(&frontend_url))
        .with_state(state)
}
