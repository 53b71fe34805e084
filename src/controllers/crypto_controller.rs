use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::CurrentUser,
    render,
    services::{crypto_service, rates_service},
    AppState,
};

// GET /crypto-exchange
pub async fn get_exchange_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let view = crypto_service::list_rates(&state).await;

    let rates: Vec<serde_json::Value> = view
        .rates
        .iter()
        .map(|r| {
            json!({
                "crypto_type": r.crypto_type,
                "crypto_symbol": r.crypto_symbol,
                "icon": crypto_service::icon(&r.crypto_type),
                "rate": rates_service::fmt_grouped(r.rate_inr),
                "address": crypto_service::deposit_address(&r.crypto_type),
            })
        })
        .collect();

    let body = render::render_partial(
        &state,
        "pages/crypto_exchange",
        &json!({ "rates": rates, "notice": view.notice }),
    );

    let user_ref = user.as_ref().map(|Extension(u)| u);
    render::page_response(&state, &headers, StatusCode::OK, "Crypto Exchange", body, user_ref)
}

#[derive(Debug, Deserialize)]
pub struct ExchangeForm {
    #[serde(default)]
    pub crypto_type: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub transaction_id: String,
}

// POST /crypto-exchange
pub async fn post_exchange(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<ExchangeForm>,
) -> Response {
    let user_ref = user.as_ref().map(|Extension(u)| u);

    match crypto_service::submit_exchange(
        &state,
        user_ref,
        &form.crypto_type,
        &form.quantity,
        &form.transaction_id,
    )
    .await
    {
        Ok(tx) => (
            StatusCode::OK,
            Html(format!(
                r#"<div class="alert alert-success mb-0">Exchange request submitted successfully! Total: ₹{}</div>"#,
                rates_service::fmt_grouped(tx.total_inr)
            )),
        )
            .into_response(),
        Err(errs) => {
            let msg = errs
                .get("_form")
                .or_else(|| errs.get("quantity"))
                .or_else(|| errs.get("transaction_id"))
                .cloned()
                .unwrap_or_else(|| "Invalid request".to_string());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(format!(r#"<div class="alert alert-danger mb-0">{}</div>"#, msg)),
            )
                .into_response()
        }
    }
}
