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
    services::{auth_service::FieldErrors, withdrawal_config_service},
    AppState,
};

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Html(r#"<div class="alert alert-danger mb-0">Not authorized</div>"#.to_string()),
    )
        .into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct MinWithdrawalForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
}

fn render_page(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    user: &CurrentUser,
    succ: Option<&str>,
    errors: &FieldErrors,
    values: &MinWithdrawalForm,
) -> Response {
    let body = render::render_partial(
        state,
        "pages/admin_withdrawal",
        &json!({
            "succ": succ,
            "errors": errors,
            "values": { "amount": values.amount, "currency": values.currency },
        }),
    );
    render::page_response(state, headers, status, "Minimum Withdrawal", body, Some(user))
}

// GET /admin/minimum-withdrawal
pub async fn get_min_withdrawal_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user.filter(|Extension(u)| u.is_admin) else {
        return forbidden();
    };

    let values = match withdrawal_config_service::active_config(&state).await {
        Some(c) => MinWithdrawalForm {
            amount: c.minimum_amount.to_string(),
            currency: c.currency,
        },
        None => MinWithdrawalForm {
            amount: String::new(),
            currency: "USDT".to_string(),
        },
    };

    render_page(&state, &headers, StatusCode::OK, &user, None, &FieldErrors::new(), &values)
}

// POST /admin/minimum-withdrawal
pub async fn post_min_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<MinWithdrawalForm>,
) -> Response {
    let Some(Extension(user)) = user.filter(|Extension(u)| u.is_admin) else {
        return forbidden();
    };

    match withdrawal_config_service::update_config(&state, &user, &form.amount, &form.currency).await {
        Ok(cfg) => {
            let values = MinWithdrawalForm {
                amount: cfg.minimum_amount.to_string(),
                currency: cfg.currency,
            };
            render_page(
                &state,
                &headers,
                StatusCode::OK,
                &user,
                Some("Minimum withdrawal amount updated successfully"),
                &FieldErrors::new(),
                &values,
            )
        }
        Err(errs) => render_page(
            &state,
            &headers,
            StatusCode::UNPROCESSABLE_ENTITY,
            &user,
            None,
            &errs,
            &form,
        ),
    }
}
