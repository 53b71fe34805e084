//! Library entrypoint for the NRX PAY web app.
//!
//! Integration tests under `tests/` import the app state, routers,
//! controllers and services from here.

use std::sync::Arc;

pub mod config;
pub mod models;

#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub store: Arc<dyn services::store::Store>,
    pub seen: Arc<dyn services::seen_popups::SeenPopups>,
    pub settings: config::Settings,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}
