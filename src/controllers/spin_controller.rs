use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{
    models::CurrentUser,
    render,
    services::spin_service::{self, SpinState, PRIZES},
    AppState,
};

fn render_modal(state: &AppState, spin: SpinState, newly_won: bool, error: Option<&str>) -> String {
    let prizes: Vec<serde_json::Value> = PRIZES
        .iter()
        .map(|p| json!({ "percentage": p.percentage, "angle": p.angle, "color": p.color }))
        .collect();

    let (state_name, won_bonus) = match spin {
        SpinState::NotChecked => ("not_checked", None),
        SpinState::CanSpin => ("can_spin", None),
        SpinState::SpinInProgress => ("spinning", None),
        SpinState::Spun(b) => ("spun", Some(b)),
    };

    let rotation = if matches!(spin, SpinState::CanSpin | SpinState::NotChecked) {
        0
    } else {
        spin_service::final_rotation()
    };

    render::render_partial(
        state,
        "partials/spin_modal",
        &json!({
            "spin_state": state_name,
            "rotation": rotation,
            "spinning": newly_won,
            "duration_s": state.settings.spin_animation_ms as f64 / 1000.0,
            "prizes": prizes,
            "error": error,
            "won_bonus": won_bonus,
            "newly_won": newly_won && error.is_none(),
            "has_spun": won_bonus.is_some(),
        }),
    )
}

// GET /spin
pub async fn get_spin_modal(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        let html = render_modal(&state, SpinState::NotChecked, false, Some("Please log in to spin."));
        return (StatusCode::UNAUTHORIZED, Html(html)).into_response();
    };

    let wheel = spin_service::check_spin_status(&state, user.id).await;
    (StatusCode::OK, Html(render_modal(&state, wheel.state(), false, None))).into_response()
}

// POST /spin
pub async fn post_spin(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let user_id = user.as_ref().map(|Extension(u)| u.id);

    match spin_service::spin(&state, user_id).await {
        Ok(outcome) => {
            let html = render_modal(
                &state,
                outcome.state,
                outcome.newly_won,
                outcome.record_error.as_deref(),
            );
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(errs) => {
            let msg = errs.get("_form").map(String::as_str);
            let html = render_modal(&state, SpinState::NotChecked, false, msg);
            (StatusCode::UNAUTHORIZED, Html(html)).into_response()
        }
    }
}
