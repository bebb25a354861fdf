//! Session guard for the auth-entry pages and both dashboard subtrees.

use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::middleware::auth::{expired_token_cookie, session_token, TOKEN_COOKIE};
use crate::services::session::{self as session_service, GuardDecision, RouteClass};
use crate::AppState;

/// Whether the guard runs for this method on a path of this class.
///
/// Auth-entry pages are guarded only when navigated to. Submitting the
/// login, join or reset form goes straight to its handler.
fn guards(method: &Method, class: RouteClass) -> bool {
    match class {
        RouteClass::Other => false,
        RouteClass::AuthEntry => matches!(*method, Method::GET | Method::HEAD),
        RouteClass::UserDashboard | RouteClass::AdminDashboard => true,
    }
}

/// True when the handler already set a fresh `token` cookie.
fn reissues_token(response: &Response) -> bool {
    let prefix = format!("{TOKEN_COOKIE}=");
    let removal = format!("{TOKEN_COOKIE}=;");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix) && !v.starts_with(&removal))
}

/// Resolve the session once, then allow or redirect.
///
/// Paths outside the guarded set pass through untouched. An allowed request
/// carries the resolved `SessionContext` as an extension. A token the
/// identity service disowned is cleared from the browser on whichever
/// response goes out, unless that response issues a new one.
pub async fn session_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let class = session_service::classify(request.uri().path());
    if !guards(request.method(), class) {
        return next.run(request).await;
    }

    let token = session_token(request.headers());
    let session = session_service::resolve(&state.identity, token).await;
    let decision = session_service::decide(session.state, request.uri().path());
    let clears_token = session.clears_token();

    tracing::debug!(
        path = %request.uri().path(),
        state = ?session.state,
        decision = ?decision,
        "Session guard"
    );

    let response = match decision {
        GuardDecision::Allow => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardDecision::Redirect(to) => Redirect::temporary(to).into_response(),
    };

    if clears_token && !reissues_token(&response) {
        let jar = jar.remove(expired_token_cookie());
        (jar, response).into_response()
    } else {
        response
    }
}
