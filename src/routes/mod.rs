use axum::Router;
use axum::middleware::from_fn_with_state;
use tower_http::services::ServeDir;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod account_routes;
pub mod wallet_routes;
pub mod crypto_routes;
pub mod spin_routes;
pub mod admin_routes;
pub mod realtime_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = account_routes::add_routes(router);
    let router = wallet_routes::add_routes(router);
    let router = crypto_routes::add_routes(router);
    let router = spin_routes::add_routes(router);
    let router = admin_routes::add_routes(router);
    let router = realtime_routes::add_routes(router);

    // outermost layer runs first: inject user, require auth, then suspension check
    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(home_controller::not_found)
        .layer(from_fn_with_state(state.clone(), crate::auth::block_suspended))
        .layer(from_fn_with_state(state.clone(), crate::auth::require_auth))
        .layer(from_fn_with_state(state.clone(), crate::auth::inject_current_user))
        .with_state(state)
}
