use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::{
    models::CurrentUser,
    render,
    services::{account_service, auth_service},
    AppState,
};

/// Decodes the auth cookie and stores the user in request extensions.
pub async fn inject_current_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let cookie_name = state.settings.jwt_cookie_name.as_str();

    if let Some(cookie) = jar.get(cookie_name) {
        if let Some(user) = auth_service::decode_user(&state.settings, cookie.value()) {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}

fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/event-stream"))
        .unwrap_or(false)
}

fn is_public_path(path: &str) -> bool {
    path == "/"
        || path == "/health"
        || path == "/health/db"
        || path == "/support-guide"
        || path == "/favicon.ico"
        || path.starts_with("/static/")
}

pub async fn require_auth(
    State(_state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if is_public_path(path) {
        return next.run(req).await;
    }

    // inject_current_user already put CurrentUser in extensions => authenticated
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }

    // Not logged in:
    // - HTMX: force full redirect to /login
    // - Normal: 302 redirect to /login
    // - SSE: 401
    if is_event_stream(req.headers()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if render::is_htmx(req.headers()) {
        let mut headers = HeaderMap::new();
        headers.insert("HX-Redirect", HeaderValue::from_static("/login"));
        return (StatusCode::OK, headers, Html("".to_string())).into_response();
    }

    Redirect::to("/login").into_response()
}

/// Suspended users only get the suspended screen (support stays reachable).
pub async fn block_suspended(
    State(state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if is_public_path(&path) && path != "/" {
        return next.run(req).await;
    }

    let Some(user) = req.extensions().get::<CurrentUser>().cloned() else {
        return next.run(req).await;
    };

    if !account_service::is_suspended(&state, user.id).await {
        return next.run(req).await;
    }

    tracing::info!(user_id = %user.id, path = %path, "suspended user blocked");

    let body = render::render_partial(
        &state,
        "pages/suspended",
        &json!({ "support_url": state.settings.support_url }),
    );

    if render::is_htmx(req.headers()) {
        return (StatusCode::FORBIDDEN, Html(body)).into_response();
    }

    match render::render_full(&state, "Account Suspended", body, Some(&user)) {
        Ok(page) => (StatusCode::FORBIDDEN, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}
