use axum::{routing::{get, post}, Router};

use crate::{controllers::account_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/accounts/:account_type", get(account_controller::get_account_page))
        .route("/accounts/:account_type/popup", post(account_controller::post_popup_action))
}
