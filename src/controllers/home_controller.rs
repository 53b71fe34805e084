use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{
    models::{AccountType, CurrentUser},
    render,
    services::{
        amounts::{self, AmountStage},
        rates_service,
        seen_popups::{PopupSession, ATTENTION_POPUP_KEY},
    },
    AppState,
};

fn popup_session(state: &AppState, user: &CurrentUser) -> PopupSession {
    PopupSession::new(user.id.to_hex(), state.seen.clone())
}

async fn attention_popup(state: &AppState) -> String {
    let rates = rates_service::usdt_rates(state).await;

    render::render_partial(
        state,
        "partials/attention_popup",
        &json!({
            "usdt_rate": rates_service::fmt_grouped(rates_service::attention_buy_rate(rates.as_ref())),
            "savings": amounts::recharge_amount(AccountType::Savings, AmountStage::Attention),
            "current": amounts::recharge_amount(AccountType::Current, AmountStage::Attention),
            "corporate": amounts::recharge_amount(AccountType::Corporate, AmountStage::Attention),
        }),
    )
}

// GET /
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let user_ref = user.as_ref().map(|Extension(u)| u);

    // anonymous visitors have no session to remember the dismissal in
    let show_attention = match user_ref {
        Some(u) => !popup_session(&state, u).has_seen(ATTENTION_POPUP_KEY),
        None => true,
    };

    let popup = if show_attention {
        attention_popup(&state).await
    } else {
        String::new()
    };

    let body = render::render_partial(
        &state,
        "pages/home",
        &json!({
            "banner_rate": rates_service::fmt_grouped(rates_service::BANNER_RATE),
            "popup": popup,
        }),
    );

    render::page_response(&state, &headers, StatusCode::OK, "Home", body, user_ref)
}

// POST /attention/dismiss
pub async fn post_attention_dismiss(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> impl IntoResponse {
    if let Some(Extension(u)) = user {
        popup_session(&state, &u).mark_seen(ATTENTION_POPUP_KEY);
    }
    (StatusCode::OK, Html(String::new()))
}

// GET /recharge
pub async fn recharge_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let amounts: Vec<serde_json::Value> = AccountType::ALL
        .iter()
        .map(|t| {
            json!({
                "name": t.display_name(),
                "amount": amounts::recharge_amount(*t, AmountStage::Recharge),
            })
        })
        .collect();

    let body = render::render_partial(
        &state,
        "pages/recharge",
        &json!({ "amounts": amounts, "support_url": state.settings.support_url }),
    );

    let user_ref = user.as_ref().map(|Extension(u)| u);
    render::page_response(&state, &headers, StatusCode::OK, "Recharge", body, user_ref)
}

// GET /support-guide
pub async fn support_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let body = render::render_partial(
        &state,
        "pages/support",
        &json!({ "support_url": state.settings.support_url }),
    );

    let user_ref = user.as_ref().map(|Extension(u)| u);
    render::page_response(&state, &headers, StatusCode::OK, "Support", body, user_ref)
}

pub async fn not_found(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let body = render::render_partial(&state, "pages/not_found", &json!({}));
    let user_ref = user.as_ref().map(|Extension(u)| u);
    render::page_response(&state, &headers, StatusCode::NOT_FOUND, "404", body, user_ref)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Html("store: ok".to_string())).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("store error: {}", e)),
        )
            .into_response(),
    }
}
