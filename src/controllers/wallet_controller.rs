use axum::{
    extract::{Extension, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::CurrentUser,
    render,
    services::{auth_service::FieldErrors, rates_service, wallet_service},
    AppState,
};

const HISTORY_LIMIT: i64 = 20;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(r#"<div class="alert alert-danger mb-0">Please log in.</div>"#.to_string()),
    )
        .into_response()
}

fn errors_html(errs: &FieldErrors) -> String {
    let mut out = String::new();
    if let Some(msg) = errs.get("_form") {
        out.push_str(&format!(r#"<div class="alert alert-danger mb-0">{}</div>"#, msg));
    }
    if let Some(msg) = errs.get("amount") {
        out.push_str(&format!(r#"<p class="text-danger small">{}</p>"#, msg));
    }
    out
}

// GET /wallet
pub async fn get_wallet_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return unauthorized();
    };

    let view = wallet_service::wallet_view(&state, user.id).await;

    let body = render::render_partial(
        &state,
        "pages/wallet",
        &json!({
            "inr_value": rates_service::fmt_grouped(view.inr_value),
            "usdt_balance": render::fmt2(view.usdt_balance),
            "sell_rate": view.sell_rate.map(rates_service::fmt_grouped),
            "notice": view.notice,
        }),
    );

    render::page_response(&state, &headers, StatusCode::OK, "Wallet", body, Some(&user))
}

// GET /wallet/withdraw
pub async fn get_withdraw_modal(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return unauthorized();
    };

    let minimum = wallet_service::minimum_withdrawal(&state).await;
    let rates = rates_service::usdt_rates(&state).await;

    let (banks, bank_error) = match wallet_service::list_bank_accounts(&state, user.id).await {
        Ok(b) => (b, None),
        Err(msg) => (vec![], Some(msg)),
    };

    let banks_json: Vec<serde_json::Value> = banks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            json!({
                "index": i,
                "bank_name": b.bank_name,
                "last4": b.last4(),
                "holder": b.account_holder_name,
            })
        })
        .collect();

    let html = render::render_partial(
        &state,
        "partials/withdraw_modal",
        &json!({
            "minimum": minimum.to_string(),
            "bank_error": bank_error,
            "has_banks": !banks_json.is_empty(),
            "banks": banks_json,
            "sell_rate": rates_service::fmt_grouped(rates_service::display_sell_rate(rates.as_ref())),
        }),
    );

    (StatusCode::OK, Html(html)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct WithdrawForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub bank: String,
}

// POST /wallet/withdraw
pub async fn post_withdraw(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<WithdrawForm>,
) -> Response {
    let user_ref = user.as_ref().map(|Extension(u)| u);

    match wallet_service::submit_withdrawal(&state, user_ref, &form.amount, &form.bank).await {
        Ok(_) => {
            let mut headers = HeaderMap::new();
            headers.insert("HX-Trigger", HeaderValue::from_static(wallet_service::WITHDRAWALS_UPDATED));
            (
                StatusCode::OK,
                headers,
                Html(
                    r#"<div class="alert alert-success mb-0">Withdrawal request submitted successfully</div>"#
                        .to_string(),
                ),
            )
                .into_response()
        }
        Err(errs) => (StatusCode::UNPROCESSABLE_ENTITY, Html(errors_html(&errs))).into_response(),
    }
}

// GET /wallet/withdrawals
pub async fn get_withdrawals_list(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return unauthorized();
    };

    let (items, notice) = match wallet_service::list_withdrawals(&state, user.id, HISTORY_LIMIT).await {
        Ok(list) => (list, None),
        Err(msg) => (vec![], Some(msg)),
    };

    let items_json: Vec<serde_json::Value> = items
        .iter()
        .map(|w| {
            let created = Utc
                .timestamp_opt(w.created_at, 0)
                .single()
                .map(|t| t.format("%d %b %Y").to_string())
                .unwrap_or_default();
            json!({
                "created_at": created,
                "amount_usdt": render::fmt2(w.amount_usdt),
                "amount_inr": rates_service::fmt_grouped(w.amount_inr),
                "status": w.status,
            })
        })
        .collect();

    let html = render::render_partial(
        &state,
        "partials/withdrawals_list",
        &json!({
            "has_items": !items_json.is_empty(),
            "items": items_json,
            "notice": notice,
        }),
    );

    (StatusCode::OK, Html(html)).into_response()
}
