use axum::{routing::get, Router};

use crate::{controllers::admin_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/admin/minimum-withdrawal",
        get(admin_controller::get_min_withdrawal_page).post(admin_controller::post_min_withdrawal),
    )
}
