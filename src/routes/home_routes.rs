use axum::{routing::{get, post}, Router};

use crate::{controllers::home_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(home_controller::home))
        .route("/attention/dismiss", post(home_controller::post_attention_dismiss))
        .route("/recharge", get(home_controller::recharge_page))
        .route("/support-guide", get(home_controller::support_page))
        .route("/health", get(home_controller::health))
        .route("/health/db", get(home_controller::health_db))
}
