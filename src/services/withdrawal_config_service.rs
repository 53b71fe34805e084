use mongodb::bson::oid::ObjectId;

use crate::{
    models::{CurrentUser, MinimumWithdrawalConfig},
    AppState,
};

use super::auth_service::FieldErrors;

pub async fn active_config(state: &AppState) -> Option<MinimumWithdrawalConfig> {
    match state.store.active_withdrawal_config().await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load minimum withdrawal config");
            None
        }
    }
}

/// Updates the active minimum, or creates it when none exists yet.
pub async fn update_config(
    state: &AppState,
    user: &CurrentUser,
    amount_raw: &str,
    currency: &str,
) -> Result<MinimumWithdrawalConfig, FieldErrors> {
    let mut errs = FieldErrors::new();

    if !user.is_admin {
        errs.insert("_form".into(), "Not authorized".into());
        return Err(errs);
    }

    let amount = match amount_raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            errs.insert("amount".into(), "Enter a valid minimum amount.".into());
            return Err(errs);
        }
    };

    let currency = match currency.trim() {
        "" => "USDT".to_string(),
        c => c.to_ascii_uppercase(),
    };

    let existing = match state.store.active_withdrawal_config().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "error loading minimum withdrawal config");
            errs.insert("_form".into(), "Failed to update minimum withdrawal amount".into());
            return Err(errs);
        }
    };

    let config = match existing {
        Some(mut c) => {
            c.minimum_amount = amount;
            c.currency = currency;
            c
        }
        None => MinimumWithdrawalConfig {
            id: ObjectId::new(),
            minimum_amount: amount,
            currency,
            is_active: true,
            created_by: Some(user.id),
        },
    };

    if let Err(e) = state.store.save_withdrawal_config(&config).await {
        tracing::error!(error = %e, "error updating minimum withdrawal config");
        errs.insert("_form".into(), "Failed to update minimum withdrawal amount".into());
        return Err(errs);
    }

    tracing::info!(admin = %user.id, minimum = config.minimum_amount, "minimum withdrawal updated");
    Ok(config)
}
