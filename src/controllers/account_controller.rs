use axum::{
    extract::{Extension, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{AccountStatus, AccountType, CurrentUser},
    render,
    services::{
        account_service,
        amounts::{self, AmountStage},
        eligibility,
        popup_sequencer::{PopupAction, PopupEffect, PopupSequencer, PopupState},
    },
    AppState,
};

fn status_label(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Pending => "pending",
        AccountStatus::Approved => "approved",
        AccountStatus::Rejected => "rejected",
        AccountStatus::Suspended => "suspended",
    }
}

fn render_popup(
    state: &AppState,
    account_type: AccountType,
    popup: PopupState,
    account_id: Option<ObjectId>,
) -> String {
    let (tpl, stage) = match popup {
        PopupState::Hidden => return String::new(),
        PopupState::RechargeVisible => ("partials/recharge_popup", AmountStage::Recharge),
        PopupState::InsufficientVisible => ("partials/insufficient_popup", AmountStage::Recharge),
        PopupState::ReviewedVisible => ("partials/reviewed_popup", AmountStage::Reviewed),
    };

    render::render_partial(
        state,
        tpl,
        &json!({
            "account_type": account_type.slug(),
            "display_name": account_type.display_name(),
            "account_id": account_id.map(|id| id.to_hex()).unwrap_or_default(),
            "amount": amounts::recharge_amount(account_type, stage),
        }),
    )
}

// GET /accounts/:type
pub async fn get_account_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_type): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Ok(account_type) = raw_type.parse::<AccountType>() else {
        return crate::controllers::home_controller::not_found(State(state), headers, user).await;
    };

    let Some(Extension(user)) = user else {
        return (
            StatusCode::UNAUTHORIZED,
            Html(r#"<div class="alert alert-danger mb-0">Please log in.</div>"#.to_string()),
        )
            .into_response();
    };

    let view = account_service::list_accounts(&state, user.id, account_type).await;

    let decision = eligibility::evaluate(&view.accounts, state.settings.popup_variant);
    let approved_id = eligibility::approved_account(&view.accounts).map(|a| a.id);

    let mut sequencer = PopupSequencer::new();
    let popup = sequencer.show(decision, approved_id);
    let popup_html = render_popup(&state, account_type, popup, sequencer.account_id());

    if popup != PopupState::Hidden {
        tracing::debug!(user_id = %user.id, %account_type, popup = popup.name(), "showing account popup");
    }

    let accounts: Vec<serde_json::Value> = view
        .accounts
        .iter()
        .map(|a| {
            let hex = a.id.to_hex();
            json!({
                "short_id": &hex[hex.len().saturating_sub(6)..],
                "status": status_label(a.status),
            })
        })
        .collect();

    let body = render::render_partial(
        &state,
        "pages/account",
        &json!({
            "account_type": account_type.slug(),
            "display_name": account_type.display_name(),
            "lower_name": account_type.slug(),
            "has_accounts": !accounts.is_empty(),
            "accounts": accounts,
            "notice": view.notice,
            "popup": popup_html,
        }),
    );

    let title = format!("{} Account", account_type.display_name());
    render::page_response(&state, &headers, StatusCode::OK, &title, body, Some(&user))
}

#[derive(Debug, Deserialize)]
pub struct PopupForm {
    pub action: String,
    #[serde(default)]
    pub popup: String,
    #[serde(default)]
    pub account_id: String,
}

// POST /accounts/:type/popup
pub async fn post_popup_action(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
    user: Option<Extension<CurrentUser>>,
    Form(form): Form<PopupForm>,
) -> Response {
    let Ok(account_type) = raw_type.parse::<AccountType>() else {
        return (StatusCode::NOT_FOUND, Html(String::new())).into_response();
    };

    let Some(action) = PopupAction::parse(&form.action) else {
        return (
            StatusCode::BAD_REQUEST,
            Html(r#"<div class="alert alert-danger mb-0">Unknown action.</div>"#.to_string()),
        )
            .into_response();
    };

    let popup = PopupState::from_name(form.popup.trim()).unwrap_or(PopupState::Hidden);
    let account_id = ObjectId::parse_str(form.account_id.trim()).ok();

    let mut sequencer = PopupSequencer::resume(popup, account_id);
    let effects = sequencer.act(action);

    let mut headers = HeaderMap::new();

    for effect in effects {
        match effect {
            PopupEffect::PersistDismissal(id) => {
                let Some(Extension(user)) = user.as_ref() else {
                    tracing::warn!(%account_type, account_id = %id, "popup dismissed without a session, flag kept");
                    continue;
                };

                // only clear the flag on an account the user owns
                let owned = account_service::list_accounts(&state, user.id, account_type).await;
                if owned.notice.is_some() {
                    tracing::warn!(user_id = %user.id, %account_type, account_id = %id, "accounts unreadable, popup flag kept");
                } else if owned.accounts.iter().any(|a| a.id == id) {
                    account_service::persist_popup_dismissal(&state, account_type, id).await;
                } else {
                    tracing::warn!(user_id = %user.id, %account_type, account_id = %id, "popup dismissal for unknown account ignored");
                }
            }
            PopupEffect::NavigateTo(path) => {
                headers.insert("HX-Redirect", HeaderValue::from_static(path));
            }
        }
    }

    // the popup is gone whatever happened to the write
    (StatusCode::OK, headers, Html(String::new())).into_response()
}
