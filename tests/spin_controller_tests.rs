mod common;

use axum::{http::StatusCode, routing::get, Router};
use nrxpay::{
    controllers::spin_controller,
    models::SpinRecord,
    services::{
        spin_service::{self, SpinState, SpinWheel},
        store::Store,
    },
    AppState,
};
use tower::ServiceExt;

use common::{form_post, get as get_req, response_body_string, test_state, test_user};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/spin", get(spin_controller::get_spin_modal).post(spin_controller::post_spin))
        .with_state(state)
}

#[test]
fn wheel_always_lands_on_twenty_percent() {
    let mut wheel = SpinWheel::new();
    assert_eq!(wheel.checked(None), SpinState::CanSpin);
    assert!(wheel.begin());
    assert!(!wheel.begin());
    assert_eq!(wheel.resolve(), 20);
    assert_eq!(wheel.state(), SpinState::Spun(20));
    assert_eq!(spin_service::final_rotation() % 360, 0);
}

#[tokio::test]
async fn fresh_user_can_spin() {
    let (state, _store) = test_state();

    let res = app(state).oneshot(get_req("/spin", Some(&test_user()))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Spin Now!"));
    assert!(body.contains(r#"data-spin-state="can_spin""#));
}

#[tokio::test]
async fn spinning_records_one_bonus_and_second_spin_is_a_no_op() {
    let (state, store) = test_state();
    let user = test_user();

    let res = app(state.clone()).oneshot(form_post("/spin", "", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("You Won 20% Bonus!"));
    assert!(body.contains("Congratulations! You won 20% recharge bonus!"));

    let records = store.spin_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bonus_percentage, 20);
    assert!(records[0].has_spun);

    let res = app(state.clone()).oneshot(form_post("/spin", "", Some(&user))).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("already used your spin"));
    assert!(!body.contains("Congratulations"));
    assert_eq!(store.spin_records().len(), 1);

    let res = app(state).oneshot(get_req("/spin", Some(&user))).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains(r#"data-spin-state="spun""#));
    assert!(!body.contains("Spin Now!"));
}

#[tokio::test]
async fn spin_without_session_is_rejected() {
    let (state, store) = test_state();

    let res = app(state).oneshot(form_post("/spin", "", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(response_body_string(res).await.contains("Please log in to spin."));
    assert!(store.spin_records().is_empty());
}

#[tokio::test]
async fn failed_record_shows_error_and_stores_nothing() {
    let (state, store) = test_state();
    store.set_fail_writes(true);

    let res = app(state).oneshot(form_post("/spin", "", Some(&test_user()))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Failed to record your spin"));
    assert!(!body.contains("Congratulations"));
    assert!(store.spin_records().is_empty());
}

#[tokio::test]
async fn concurrent_spins_store_one_record_and_only_one_wins() {
    let (mut state, store) = test_state();
    state.settings.spin_animation_ms = 20;
    let user = test_user();

    let (first, second) = tokio::join!(
        spin_service::spin(&state, Some(user.id)),
        spin_service::spin(&state, Some(user.id))
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(store.spin_records().len(), 1);
    assert_eq!(first.state, SpinState::Spun(20));
    assert_eq!(second.state, SpinState::Spun(20));
    assert_eq!([first.newly_won, second.newly_won].iter().filter(|w| **w).count(), 1);
}

#[tokio::test]
async fn record_spin_reports_whether_it_inserted() {
    let (_state, store) = test_state();
    let user = test_user();
    let record = SpinRecord {
        user_id: user.id,
        bonus_percentage: 20,
        has_spun: true,
        spun_at: 1,
    };

    let (_, inserted) = store.record_spin(&record).await.unwrap();
    assert!(inserted);

    let again = SpinRecord { spun_at: 1, ..record };
    let (stored, inserted) = store.record_spin(&again).await.unwrap();
    assert!(!inserted);
    assert_eq!(stored.bonus_percentage, 20);
}
