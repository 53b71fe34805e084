use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use regex::Regex;

use crate::{
    models::{BankAccount, CurrentUser, Withdrawal},
    AppState,
};

use super::{auth_service::FieldErrors, rates_service, withdrawal_config_service};

pub const DEFAULT_MINIMUM_WITHDRAWAL: f64 = 100.0;

/// SSE event fired after a withdrawal is stored.
pub const WITHDRAWALS_UPDATED: &str = "withdrawalsUpdated";

/// Bus message for an event meant for one user's streams.
pub fn user_event(name: &str, user_id: ObjectId) -> String {
    format!("{}:{}", name, user_id.to_hex())
}

pub fn split_user_event(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(':')
}

#[derive(Debug, Clone)]
pub struct WalletView {
    pub usdt_balance: f64,
    /// Balance in INR at the sell rate, rounded; 0 until both are known.
    pub inr_value: f64,
    pub sell_rate: Option<f64>,
    pub notice: Option<String>,
}

pub async fn wallet_view(state: &AppState, user_id: ObjectId) -> WalletView {
    let rates = rates_service::usdt_rates(state).await;

    let (balance, notice) = match state.store.user_balance(user_id).await {
        Ok(b) => (b, None),
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "failed to load balance");
            (None, Some("Failed to load your balance.".to_string()))
        }
    };

    let usdt_balance = balance.as_ref().map(|b| b.usdt_balance).unwrap_or(0.0);
    let inr_value = match (&rates, &balance) {
        (Some(r), Some(b)) => (b.usdt_balance * r.sell_rate).round(),
        _ => 0.0,
    };

    WalletView {
        usdt_balance,
        inr_value,
        sell_rate: rates.map(|r| r.sell_rate),
        notice,
    }
}

pub async fn list_bank_accounts(state: &AppState, user_id: ObjectId) -> Result<Vec<BankAccount>, String> {
    state.store.list_bank_accounts(user_id).await.map_err(|e| {
        tracing::warn!(%user_id, error = %e, "error fetching bank accounts");
        "Failed to load bank accounts".to_string()
    })
}

pub async fn minimum_withdrawal(state: &AppState) -> f64 {
    withdrawal_config_service::active_config(state)
        .await
        .map(|c| c.minimum_amount)
        .unwrap_or(DEFAULT_MINIMUM_WITHDRAWAL)
}

/// Parses the USDT amount field. Blank or malformed input counts as 0.
/// A trailing dot is accepted; more than two decimals is not.
pub fn parse_usdt_amount(raw: &str) -> f64 {
    let re = Regex::new(r"^\d+(\.\d{0,2})?$").expect("valid amount regex");
    let raw = raw.trim();
    if !re.is_match(raw) {
        return 0.0;
    }
    raw.parse::<f64>().unwrap_or(0.0)
}

pub fn is_valid_amount(usdt_amount: f64, minimum: f64) -> bool {
    usdt_amount.is_finite() && usdt_amount >= minimum
}

pub async fn submit_withdrawal(
    state: &AppState,
    user: Option<&CurrentUser>,
    amount_raw: &str,
    bank_raw: &str,
) -> Result<Withdrawal, FieldErrors> {
    let mut errs = FieldErrors::new();

    let Some(user) = user else {
        errs.insert("_form".into(), "Please log in to submit a withdrawal".into());
        return Err(errs);
    };

    let minimum = minimum_withdrawal(state).await;
    let usdt_amount = parse_usdt_amount(amount_raw);

    let banks = match list_bank_accounts(state, user.id).await {
        Ok(b) => b,
        Err(msg) => {
            errs.insert("_form".into(), msg);
            return Err(errs);
        }
    };

    let bank_index = bank_raw.trim().parse::<usize>().ok().filter(|i| *i < banks.len());

    if !is_valid_amount(usdt_amount, minimum) || bank_index.is_none() {
        errs.insert("_form".into(), "Please fill all fields with valid data".into());
        if !is_valid_amount(usdt_amount, minimum) {
            errs.insert("amount".into(), format!("Minimum amount is ${} USDT", minimum));
        }
        return Err(errs);
    }

    let rates = rates_service::usdt_rates(state).await;
    let amount_inr = usdt_amount * rates_service::display_sell_rate(rates.as_ref());

    let withdrawal = Withdrawal {
        id: ObjectId::new(),
        user_id: user.id,
        amount_usdt: usdt_amount,
        amount_inr,
        // bank records carry no id of their own; the owner id stands in for it
        bank_account_id: user.id,
        usdt_rate: rates_service::recorded_sell_rate(rates.as_ref()),
        status: "ongoing".to_string(),
        created_at: Utc::now().timestamp(),
    };

    if let Err(e) = state.store.insert_withdrawal(&withdrawal).await {
        tracing::error!(user_id = %user.id, error = %e, "error submitting withdrawal");
        errs.insert("_form".into(), "Failed to submit withdrawal request".into());
        return Err(errs);
    }

    tracing::info!(user_id = %user.id, amount_usdt = usdt_amount, "withdrawal request submitted");
    let _ = state.events_tx.send(user_event(WITHDRAWALS_UPDATED, user.id));

    Ok(withdrawal)
}

pub async fn list_withdrawals(state: &AppState, user_id: ObjectId, limit: i64) -> Result<Vec<Withdrawal>, String> {
    state.store.list_withdrawals(user_id, limit).await.map_err(|e| {
        tracing::warn!(%user_id, error = %e, "failed to load withdrawals");
        "Failed to load withdrawal history".to_string()
    })
}
