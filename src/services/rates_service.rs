use crate::{models::UsdtRates, AppState};

// Fallbacks used by the published screens when the rate record is missing.
// They differ per screen; keep them as they are.
pub const SELL_RATE_DISPLAY_FALLBACK: f64 = 98.0;
pub const SELL_RATE_RECORDED_FALLBACK: f64 = 102.0;
pub const BUY_RATE_ATTENTION_FALLBACK: f64 = 99.0;
pub const BANNER_RATE: f64 = 103.0;

pub async fn usdt_rates(state: &AppState) -> Option<UsdtRates> {
    match state.store.usdt_rates().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load usdt rates");
            None
        }
    }
}

pub fn display_sell_rate(rates: Option<&UsdtRates>) -> f64 {
    rates.map(|r| r.sell_rate).unwrap_or(SELL_RATE_DISPLAY_FALLBACK)
}

pub fn recorded_sell_rate(rates: Option<&UsdtRates>) -> f64 {
    rates.map(|r| r.sell_rate).unwrap_or(SELL_RATE_RECORDED_FALLBACK)
}

pub fn attention_buy_rate(rates: Option<&UsdtRates>) -> f64 {
    rates.map(|r| r.buy_rate).unwrap_or(BUY_RATE_ATTENTION_FALLBACK)
}

/// Formats a rupee amount with thousands separators, e.g. `12,345.5`.
pub fn fmt_grouped(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();

    let whole = abs.trunc() as u64;
    let frac = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0 {
        let frac_str = format!("{:02}", frac);
        out.push('.');
        out.push_str(frac_str.trim_end_matches('0'));
    }
    out
}
