use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdtRates {
    pub buy_rate: f64,
    pub sell_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoRate {
    pub crypto_type: String,
    pub crypto_symbol: String,
    pub rate_inr: f64,

    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}
