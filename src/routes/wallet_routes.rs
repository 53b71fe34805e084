use axum::{routing::get, Router};

use crate::{controllers::wallet_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/wallet", get(wallet_controller::get_wallet_page))
        .route(
            "/wallet/withdraw",
            get(wallet_controller::get_withdraw_modal).post(wallet_controller::post_withdraw),
        )
        .route("/wallet/withdrawals", get(wallet_controller::get_withdrawals_list))
}
