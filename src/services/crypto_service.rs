use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use regex::Regex;

use crate::{
    models::{CryptoRate, CryptoTransaction, CurrentUser},
    AppState,
};

use super::auth_service::FieldErrors;

/// Where users send coins for an exchange request.
pub fn deposit_address(crypto_type: &str) -> Option<&'static str> {
    match crypto_type {
        "bitcoin" => Some("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh"),
        "ethereum" => Some("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb"),
        "solana" => Some("DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK"),
        "litecoin" => Some("LQTpS3VaYTjCr4s9Y8p8X3xT7F7bLnR2Kc"),
        _ => None,
    }
}

pub fn icon(crypto_type: &str) -> &'static str {
    match crypto_type {
        "bitcoin" => "₿",
        "ethereum" => "Ξ",
        "solana" => "◎",
        "litecoin" => "Ł",
        _ => "₿",
    }
}

#[derive(Debug, Clone, Default)]
pub struct RatesView {
    pub rates: Vec<CryptoRate>,
    pub notice: Option<String>,
}

pub async fn list_rates(state: &AppState) -> RatesView {
    match state.store.list_crypto_rates().await {
        Ok(rates) => RatesView { rates, notice: None },
        Err(e) => {
            tracing::warn!(error = %e, "error fetching crypto rates");
            RatesView {
                rates: vec![],
                notice: Some("Failed to load crypto rates".to_string()),
            }
        }
    }
}

/// Parses the quantity field; up to 8 decimal places.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let re = Regex::new(r"^(\d+(\.\d{0,8})?|\.\d{1,8})$").expect("valid quantity regex");
    let raw = raw.trim();
    if !re.is_match(raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|q| q.is_finite())
}

pub fn total_inr(quantity: f64, rate_inr: f64) -> f64 {
    (quantity * rate_inr * 100.0).round() / 100.0
}

pub async fn submit_exchange(
    state: &AppState,
    user: Option<&CurrentUser>,
    crypto_type: &str,
    quantity_raw: &str,
    transaction_id: &str,
) -> Result<CryptoTransaction, FieldErrors> {
    let mut errs = FieldErrors::new();

    let selected = if crypto_type.trim().is_empty() {
        None
    } else {
        list_rates(state)
            .await
            .rates
            .into_iter()
            .find(|r| r.crypto_type == crypto_type.trim())
    };

    let (Some(user), Some(selected)) = (user, selected) else {
        errs.insert("_form".into(), "Please select a crypto and log in".into());
        return Err(errs);
    };

    let quantity = match parse_quantity(quantity_raw) {
        Some(q) if q > 0.0 => q,
        _ => {
            errs.insert("quantity".into(), "Please enter a valid quantity".into());
            return Err(errs);
        }
    };

    let transaction_id = transaction_id.trim();
    if transaction_id.is_empty() {
        errs.insert("transaction_id".into(), "Please enter transaction ID".into());
        return Err(errs);
    }

    let username = match state.store.user_profile(user.id).await {
        Ok(p) => p.and_then(|p| p.username),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "failed to load username");
            None
        }
    };

    let tx = CryptoTransaction {
        id: ObjectId::new(),
        user_id: user.id,
        username,
        crypto_type: selected.crypto_type.clone(),
        crypto_symbol: selected.crypto_symbol.clone(),
        quantity,
        rate_inr: selected.rate_inr,
        total_inr: total_inr(quantity, selected.rate_inr),
        transaction_id: transaction_id.to_string(),
        status: "pending".to_string(),
        created_at: Utc::now().timestamp(),
    };

    if let Err(e) = state.store.insert_crypto_transaction(&tx).await {
        tracing::error!(user_id = %user.id, error = %e, "error creating crypto transaction");
        errs.insert("_form".into(), "Failed to submit exchange request".into());
        return Err(errs);
    }

    tracing::info!(user_id = %user.id, crypto = %tx.crypto_type, quantity, "exchange request submitted");
    Ok(tx)
}
