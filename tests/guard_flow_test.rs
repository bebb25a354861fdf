//! End-to-end tests of the session guard and auth flows.
//!
//! A stub identity service is served by axum on an ephemeral port; the
//! application router is driven in-process with `oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use writeverse::config::AppConfig;
use writeverse::AppState;

const ADMIN_TOKEN: &str = "admin-token";
const USER_TOKEN: &str = "user-token";
const STALE_TOKEN: &str = "stale-token";
const GONE_TOKEN: &str = "gone-token";

#[derive(Clone, Default)]
struct Stub {
    user_lookups: Arc<AtomicUsize>,
}

async fn current_user(State(stub): State<Stub>, headers: HeaderMap) -> impl IntoResponse {
    stub.user_lookups.fetch_add(1, Ordering::SeqCst);
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    match token {
        ADMIN_TOKEN => (
            StatusCode::OK,
            Json(json!({"ok": true, "user": {"role": "admin", "email": "admin@example.com"}})),
        ),
        USER_TOKEN => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "user": {
                    "role": "user",
                    "email": "john.doe@example.com",
                    "firstName": "John",
                    "lastName": "Doe"
                }
            })),
        ),
        STALE_TOKEN => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "message": "Invalid token"})),
        ),
        GONE_TOKEN => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "message": "User not found"})),
        ),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"ok": false, "message": "Try again later"})),
        ),
    }
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("john.doe@example.com"), Some("Secret#123")) => (
            StatusCode::OK,
            Json(json!({"ok": true, "token": USER_TOKEN, "userRole": "user"})),
        ),
        (Some("missing@example.com"), _) => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "message": "User not found"})),
        ),
        (Some("broken@example.com"), _) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"ok": false, "message": "Database down"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "message": "Invalid credentials"})),
        ),
    }
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"ok": false, "message": "User already exists"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"ok": true, "token": "fresh-token", "userRole": "user"})),
    )
}

async fn forgot_password(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "john.doe@example.com" {
        (StatusCode::OK, Json(json!({"ok": true})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "message": "No account with that email"})),
        )
    }
}

async fn reset_password() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"ok": false, "message": "Reset link expired"})),
    )
}

/// Serve the stub identity service, returning its base URL and lookup counter.
async fn start_identity() -> (String, Arc<AtomicUsize>) {
    let stub = Stub::default();
    let lookups = stub.user_lookups.clone();
    let app = Router::new()
        .route("/api/auth/user", get(current_user))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", put(reset_password))
        .with_state(stub);

    (serve(app).await, lookups)
}

/// Serve a stub on an ephemeral port, returning its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{addr}")
}

async fn app() -> (Router, Arc<AtomicUsize>) {
    let (base, lookups) = start_identity().await;
    let state = AppState::new(AppConfig::for_identity(&base)).expect("state");
    (writeverse::routes::router(state), lookups)
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::COOKIE, format!("token={t}"));
    }
    builder.body(Body::empty()).expect("request")
}

fn with_token(mut request: Request<Body>, token: &str) -> Request<Body> {
    let cookie = format!("token={token}").parse().expect("cookie header");
    request.headers_mut().insert(header::COOKIE, cookie);
    request
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn admin_on_login_redirects_to_admin_dashboard() {
    let (app, lookups) = app().await;
    let response = app
        .oneshot(get_with_token("/login", Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin/dashboard");
    assert_eq!(lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn anonymous_on_dashboard_subtree_redirects_to_login() {
    let (app, lookups) = app().await;
    let response = app
        .oneshot(get_with_token("/user/dashboard/settings", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    assert_eq!(lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_token_redirects_and_clears_cookie() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/admin/dashboard", Some(STALE_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token="), "{cookie}");
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
    assert!(cookie.contains("SameSite=Strict"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
}

#[tokio::test]
async fn vanished_account_can_still_open_login() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/login", Some(GONE_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).starts_with("token="));
}

#[tokio::test]
async fn user_on_admin_subtree_goes_home() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/admin/dashboard/reports", Some(USER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/user/dashboard");
}

#[tokio::test]
async fn transient_identity_answer_is_anonymous() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/user/dashboard", Some("unknown-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    // Not a disowned token, so the cookie stays.
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn unreachable_identity_fails_closed() {
    let state = AppState::new(AppConfig::for_identity("http://127.0.0.1:9")).unwrap();
    let app = writeverse::routes::router(state);
    let response = app
        .oneshot(get_with_token("/admin/dashboard", Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn hanging_identity_times_out_to_login() {
    let stub = Router::new().route(
        "/api/auth/user",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"ok": true, "user": {"role": "admin"}}))
        }),
    );
    let base = serve(stub).await;
    let config = AppConfig {
        identity_timeout_ms: 200,
        ..AppConfig::for_identity(&base)
    };
    let app = writeverse::routes::router(AppState::new(config).unwrap());

    let started = Instant::now();
    let response = app
        .oneshot(get_with_token("/admin/dashboard", Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn malformed_identity_body_fails_closed() {
    let stub = Router::new().route(
        "/api/auth/user",
        get(|| async { (StatusCode::OK, "<html>oops</html>") }),
    );
    let base = serve(stub).await;
    let state = AppState::new(AppConfig::for_identity(&base)).unwrap();
    let app = writeverse::routes::router(state);

    let response = app
        .oneshot(get_with_token("/user/dashboard", Some(USER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn dashboard_resolves_identity_once() {
    let (app, lookups) = app().await;
    let response = app
        .oneshot(get_with_token("/user/dashboard", Some(USER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lookups.load(Ordering::SeqCst), 1);

    let body = body_json(response).await;
    assert_eq!(body["data"]["stats"]["posts"], 20);
    assert_eq!(body["data"]["stats"]["drafts"], 10);
}

#[tokio::test]
async fn public_pages_skip_identity() {
    let (app, lookups) = app().await;
    let response = app
        .oneshot(get_with_token("/posts?page=2&category=all", Some(USER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(lookups.load(Ordering::SeqCst), 0);

    let body = body_json(response).await;
    assert_eq!(body["data"]["current_page"], 2);
    assert_eq!(body["data"]["total"], 60);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn login_sets_session_cookie() {
    let (app, _) = app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "  john.doe@example.com ", "password": "Secret#123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token=user-token"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
    assert!(cookie.contains("SameSite=Strict"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(cookie.contains("Max-Age=604800"), "{cookie}");

    let body = body_json(response).await;
    assert_eq!(body["data"]["redirect_to"], "/user/dashboard");
    assert_eq!(body["data"]["message"], "Logged in successfully.");
}

#[tokio::test]
async fn login_over_stale_cookie_keeps_new_session() {
    let (app, _) = app().await;
    let request = json_request(
        "POST",
        "/login",
        json!({"email": "john.doe@example.com", "password": "Secret#123"}),
    );
    let response = app.oneshot(with_token(request, STALE_TOKEN)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1, "{cookies:?}");
    assert!(cookies[0].starts_with("token=user-token"), "{cookies:?}");
    assert!(!cookies[0].contains("Max-Age=0"), "{cookies:?}");
}

#[tokio::test]
async fn join_over_stale_cookie_keeps_new_session() {
    let (app, _) = app().await;
    let request = json_request(
        "POST",
        "/join",
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "Secret#123",
            "confirmPassword": "Secret#123"
        }),
    );
    let response = app.oneshot(with_token(request, STALE_TOKEN)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1, "{cookies:?}");
    assert!(cookies[0].starts_with("token=fresh-token"), "{cookies:?}");
    assert!(!cookies[0].contains("Max-Age=0"), "{cookies:?}");
}

#[tokio::test]
async fn signed_in_form_submissions_reach_handlers() {
    let (app, lookups) = app().await;

    let request = json_request(
        "POST",
        "/login",
        json!({"email": "john.doe@example.com", "password": "Secret#123"}),
    );
    let response = app
        .clone()
        .oneshot(with_token(request, ADMIN_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["redirect_to"], "/user/dashboard");

    let request = json_request(
        "PUT",
        "/reset-password?token=abc",
        json!({"newPassword": "Secret#123", "reTypedPassword": "Secret#123"}),
    );
    let response = app.oneshot(with_token(request, USER_TOKEN)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Reset link expired");

    assert_eq!(lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn login_failures_map_to_form_messages() {
    let (app, _) = app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "missing@example.com", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "User not found with this email address."
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "john.doe@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Your credentials are invalid.");

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "broken@example.com", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "An error occurred. Please try again."
    );
}

#[tokio::test]
async fn join_validates_before_registering() {
    let (app, _) = app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/join",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "password",
                "confirmPassword": "password"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "At least one uppercase character required!"
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/join",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "taken@example.com",
                "password": "Secret#123",
                "confirmPassword": "Secret#123"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "User already exists with this email address."
    );
}

#[tokio::test]
async fn password_recovery_surfaces_identity_messages() {
    let (app, _) = app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/forgot-password",
            json!({"email": "nobody@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "No account with that email");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/reset-password?token=abc",
            json!({"newPassword": "Secret#123", "reTypedPassword": "Secret#123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Reset link expired");
}

#[tokio::test]
async fn member_actions_need_a_session() {
    let (app, _) = app().await;
    let response = app
        .oneshot(json_request("POST", "/posts/1/vote", json!({"vote": "upvote"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_screens_forbid_members() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/admin/users", Some(USER_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn session_endpoint_reports_role() {
    let (app, _) = app().await;
    let response = app
        .oneshot(get_with_token("/api/session", Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["state"], "authenticated_admin");
    assert!(body["data"].get("token").is_none());
}
