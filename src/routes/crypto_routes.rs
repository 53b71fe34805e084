use axum::{routing::get, Router};

use crate::{controllers::crypto_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/crypto-exchange",
        get(crypto_controller::get_exchange_page).post(crypto_controller::post_exchange),
    )
}
