use axum::{routing::get, Router};

use crate::{controllers::spin_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/spin", get(spin_controller::get_spin_modal).post(spin_controller::post_spin))
}
