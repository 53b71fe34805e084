mod common;

use axum::{http::StatusCode, routing::get, Router};
use mongodb::bson::oid::ObjectId;
use nrxpay::{
    controllers::wallet_controller,
    models::{BankAccount, CurrentUser, MinimumWithdrawalConfig, UsdtRates, UserBalance},
    services::{memory_store::MemoryStore, store::Store},
    AppState,
};
use tower::ServiceExt;

use common::{form_post, get as get_req, response_body_string, test_state, test_user};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/wallet", get(wallet_controller::get_wallet_page))
        .route(
            "/wallet/withdraw",
            get(wallet_controller::get_withdraw_modal).post(wallet_controller::post_withdraw),
        )
        .route("/wallet/withdrawals", get(wallet_controller::get_withdrawals_list))
        .with_state(state)
}

fn seed_bank(store: &MemoryStore, user: &CurrentUser) {
    store.add_bank_account(BankAccount {
        user_id: user.id,
        account_number: "123456789012".to_string(),
        account_holder_name: "Test Holder".to_string(),
        bank_name: "State Bank".to_string(),
        branch_name: String::new(),
        ifsc_code: String::new(),
        is_active: true,
    });
}

#[tokio::test]
async fn withdrawal_at_minimum_is_accepted() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);
    store.set_usdt_rates(UsdtRates { buy_rate: 99.0, sell_rate: 95.0 });

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=100&bank=0", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Trigger").unwrap(), "withdrawalsUpdated");
    assert!(response_body_string(res).await.contains("submitted successfully"));

    let stored = store.withdrawals();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount_usdt, 100.0);
    assert_eq!(stored[0].amount_inr, 9500.0);
    assert_eq!(stored[0].usdt_rate, 95.0);
    assert_eq!(stored[0].status, "ongoing");
    assert_eq!(stored[0].bank_account_id, user.id);
}

#[tokio::test]
async fn withdrawal_below_minimum_is_rejected() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=99.99&bank=0", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_body_string(res).await;
    assert!(body.contains("Please fill all fields with valid data"));
    assert!(body.contains("Minimum amount is $100 USDT"));
    assert!(store.withdrawals().is_empty());
}

#[tokio::test]
async fn configured_minimum_applies() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);
    store
        .save_withdrawal_config(&MinimumWithdrawalConfig {
            id: ObjectId::new(),
            minimum_amount: 150.0,
            currency: "USDT".to_string(),
            is_active: true,
            created_by: None,
        })
        .await
        .unwrap();

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=120&bank=0", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response_body_string(res).await.contains("Minimum amount is $150 USDT"));
    assert!(store.withdrawals().is_empty());
}

#[tokio::test]
async fn missing_rates_use_fallbacks() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=100&bank=0", Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let stored = store.withdrawals();
    assert_eq!(stored[0].amount_inr, 9800.0);
    assert_eq!(stored[0].usdt_rate, 102.0);
}

#[tokio::test]
async fn unknown_bank_selection_is_rejected() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=200&bank=3", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_body_string(res).await;
    assert!(body.contains("Please fill all fields with valid data"));
    assert!(!body.contains("Minimum amount"));
}

#[tokio::test]
async fn withdrawal_without_session_is_rejected() {
    let (state, store) = test_state();

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=100&bank=0", None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response_body_string(res).await.contains("Please log in to submit a withdrawal"));
    assert!(store.withdrawals().is_empty());
}

#[tokio::test]
async fn failed_insert_reports_error() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);
    store.set_fail_writes(true);

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=100&bank=0", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response_body_string(res).await.contains("Failed to submit withdrawal request"));
}

#[tokio::test]
async fn withdraw_modal_without_banks_prompts_to_add_one() {
    let (state, _store) = test_state();
    let user = test_user();

    let res = app(state).oneshot(get_req("/wallet/withdraw", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("No bank accounts found"));
    assert!(body.contains("Minimum withdrawal: $100 USDT"));
}

#[tokio::test]
async fn withdraw_modal_lists_masked_banks() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);

    let res = app(state).oneshot(get_req("/wallet/withdraw", Some(&user))).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("State Bank - 9012"));
    assert!(!body.contains("123456789012"));
}

#[tokio::test]
async fn history_lists_submitted_withdrawal() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);
    store.set_usdt_rates(UsdtRates { buy_rate: 99.0, sell_rate: 95.0 });

    let res = app(state.clone())
        .oneshot(form_post("/wallet/withdraw", "amount=100&bank=0", Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(state).oneshot(get_req("/wallet/withdrawals", Some(&user))).await.unwrap();
    let body = response_body_string(res).await;
    assert!(body.contains("$100.00 USDT"));
    assert!(body.contains("9,500"));
    assert!(body.contains("ongoing"));
}

#[tokio::test]
async fn wallet_page_shows_balance_in_inr() {
    let (state, store) = test_state();
    let user = test_user();
    store.set_usdt_rates(UsdtRates { buy_rate: 99.0, sell_rate: 95.0 });
    store.set_balance(UserBalance { user_id: user.id, usdt_balance: 250.0 });

    let res = app(state).oneshot(get_req("/wallet", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("23,750"));
    assert!(body.contains("250.00 USDT"));
}

#[test]
fn amount_parse_accepts_trailing_dot_and_caps_decimals() {
    use nrxpay::services::wallet_service::parse_usdt_amount;

    assert_eq!(parse_usdt_amount("100."), 100.0);
    assert_eq!(parse_usdt_amount("100.5"), 100.5);
    assert_eq!(parse_usdt_amount("100.123"), 0.0);
    assert_eq!(parse_usdt_amount("abc"), 0.0);
}

#[tokio::test]
async fn withdrawal_with_trailing_dot_is_accepted() {
    let (state, store) = test_state();
    let user = test_user();
    seed_bank(&store, &user);

    let res = app(state)
        .oneshot(form_post("/wallet/withdraw", "amount=100.&bank=0", Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.withdrawals()[0].amount_usdt, 100.0);
}
