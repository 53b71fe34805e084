#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header, Request};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use nrxpay::{
    config::{self, PopupVariant},
    models::{Account, AccountStatus, CurrentUser},
    services::{memory_store::MemoryStore, seen_popups::MemorySeenPopups},
    templates, AppState,
};

pub fn test_state_with(variant: PopupVariant) -> (AppState, Arc<MemoryStore>) {
    let mut settings = config::load();
    settings.popup_variant = variant;
    settings.spin_animation_ms = 0;
    settings.jwt_secret = "test-secret".to_string();
    settings.jwt_cookie_name = "auth".to_string();

    let store = Arc::new(MemoryStore::new());
    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(16);

    let state = AppState {
        hbs: templates::build_handlebars(),
        store: store.clone(),
        seen: Arc::new(MemorySeenPopups::new()),
        settings,
        events_tx,
    };

    (state, store)
}

pub fn test_state() -> (AppState, Arc<MemoryStore>) {
    test_state_with(PopupVariant::Recharge)
}

pub fn test_user() -> CurrentUser {
    CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
        is_admin: false,
    }
}

pub fn approved_account(user: &CurrentUser, show_recharge_popup: bool) -> Account {
    Account {
        id: ObjectId::new(),
        user_id: user.id,
        status: AccountStatus::Approved,
        show_recharge_popup,
        insufficient_recharge: false,
        created_at: 0,
    }
}

pub fn form_post(uri: &str, body: &str, user: Option<&CurrentUser>) -> Request<axum::body::Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();
    if let Some(u) = user {
        req.extensions_mut().insert(u.clone());
    }
    req
}

pub fn get(uri: &str, user: Option<&CurrentUser>) -> Request<axum::body::Body> {
    let mut req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    if let Some(u) = user {
        req.extensions_mut().insert(u.clone());
    }
    req
}

pub async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
