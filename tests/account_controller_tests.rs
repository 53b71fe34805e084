mod common;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use nrxpay::{config::PopupVariant, controllers::account_controller, models::AccountType, AppState};
use tower::ServiceExt;

use common::{approved_account, form_post, get as get_req, response_body_string, test_state, test_state_with, test_user};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/accounts/:account_type", get(account_controller::get_account_page))
        .route("/accounts/:account_type/popup", post(account_controller::post_popup_action))
        .with_state(state)
}

#[tokio::test]
async fn approved_corporate_account_shows_recharge_popup() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Corporate, acc.clone());

    let res = app(state).oneshot(get_req("/accounts/corporate", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains(r#"data-popup="recharge""#));
    assert!(body.contains("Account Approved"));
    assert!(body.contains("$2000"));
    assert!(body.contains(&acc.id.to_hex()));
}

#[tokio::test]
async fn dismissing_recharge_popup_clears_flag_and_it_stays_gone() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Savings, acc.clone());

    let body = format!("action=later&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state.clone())
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(response_body_string(res).await.is_empty());

    let stored = store.account(AccountType::Savings, acc.id).unwrap();
    assert!(!stored.show_recharge_popup);

    let res = app(state).oneshot(get_req("/accounts/savings", Some(&user))).await.unwrap();
    let page = response_body_string(res).await;
    assert!(!page.contains("data-popup="));
}

#[tokio::test]
async fn recharge_action_redirects_and_clears_flag() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Current, acc.clone());

    let body = format!("action=recharge&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/current/popup", &body, Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Redirect").unwrap(), "/recharge");
    assert!(!store.account(AccountType::Current, acc.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn failed_write_still_closes_popup() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Savings, acc.clone());
    store.set_fail_writes(true);

    let body = format!("action=close&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(response_body_string(res).await.is_empty());
    assert!(store.account(AccountType::Savings, acc.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn dismissal_for_someone_elses_account_is_ignored() {
    let (state, store) = test_state();
    let owner = test_user();
    let intruder = test_user();
    let acc = approved_account(&owner, true);
    store.add_account(AccountType::Savings, acc.clone());

    let body = format!("action=later&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&intruder)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(store.account(AccountType::Savings, acc.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn reviewed_variant_shows_reviewed_amount_and_keeps_flag() {
    let (state, store) = test_state_with(PopupVariant::Reviewed);
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Current, acc.clone());

    let res = app(state.clone()).oneshot(get_req("/accounts/current", Some(&user))).await.unwrap();
    let page = response_body_string(res).await;
    assert!(page.contains(r#"data-popup="reviewed""#));
    assert!(page.contains("Account Reviewed"));
    assert!(page.contains("$600"));

    let body = format!("action=close&popup=reviewed&account_id={}", acc.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/current/popup", &body, Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(store.account(AccountType::Current, acc.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn insufficient_recharge_shows_warning_popup() {
    let (state, store) = test_state();
    let user = test_user();
    let mut acc = approved_account(&user, false);
    acc.insufficient_recharge = true;
    store.add_account(AccountType::Savings, acc);

    let res = app(state).oneshot(get_req("/accounts/savings", Some(&user))).await.unwrap();
    let page = response_body_string(res).await;
    assert!(page.contains(r#"data-popup="insufficient""#));
    assert!(page.contains("$300"));
}

#[tokio::test]
async fn pending_account_with_flag_shows_no_popup() {
    let (state, store) = test_state();
    let user = test_user();
    let mut acc = approved_account(&user, true);
    acc.status = nrxpay::models::AccountStatus::Pending;
    store.add_account(AccountType::Corporate, acc);

    let res = app(state).oneshot(get_req("/accounts/corporate", Some(&user))).await.unwrap();
    let page = response_body_string(res).await;
    assert!(page.contains("pending"));
    assert!(!page.contains("data-popup="));
}

#[tokio::test]
async fn failed_read_shows_notice_and_no_popup() {
    let (state, store) = test_state();
    let user = test_user();
    store.add_account(AccountType::Savings, approved_account(&user, true));
    store.set_fail_reads(true);

    let res = app(state).oneshot(get_req("/accounts/savings", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let page = response_body_string(res).await;
    assert!(page.contains("Failed to load your accounts"));
    assert!(!page.contains("data-popup="));
}

#[tokio::test]
async fn unknown_account_type_is_not_found() {
    let (state, _store) = test_state();
    let user = test_user();

    let res = app(state).oneshot(get_req("/accounts/business", Some(&user))).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dismissal_without_session_writes_nothing() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Savings, acc.clone());

    let body = format!("action=later&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state).oneshot(form_post("/accounts/savings/popup", &body, None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(store.account(AccountType::Savings, acc.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn dismissal_on_one_type_leaves_other_type_untouched() {
    let (state, store) = test_state();
    let user = test_user();
    let savings = approved_account(&user, true);
    let corporate = approved_account(&user, true);
    store.add_account(AccountType::Savings, savings.clone());
    store.add_account(AccountType::Corporate, corporate.clone());

    let body = format!("action=later&popup=recharge&account_id={}", savings.id.to_hex());
    let res = app(state.clone())
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!store.account(AccountType::Savings, savings.id).unwrap().show_recharge_popup);

    let res = app(state.clone()).oneshot(get_req("/accounts/corporate", Some(&user))).await.unwrap();
    let page = response_body_string(res).await;
    assert!(page.contains(r#"data-popup="recharge""#));

    // a corporate id posted under the savings type is not a savings account
    let body = format!("action=later&popup=recharge&account_id={}", corporate.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&user)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(store.account(AccountType::Corporate, corporate.id).unwrap().show_recharge_popup);
}

#[tokio::test]
async fn dismissal_while_accounts_unreadable_keeps_flag_and_closes() {
    let (state, store) = test_state();
    let user = test_user();
    let acc = approved_account(&user, true);
    store.add_account(AccountType::Savings, acc.clone());
    store.set_fail_reads(true);

    let body = format!("action=later&popup=recharge&account_id={}", acc.id.to_hex());
    let res = app(state)
        .oneshot(form_post("/accounts/savings/popup", &body, Some(&user)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(response_body_string(res).await.is_empty());
    assert!(store.account(AccountType::Savings, acc.id).unwrap().show_recharge_popup);
}
