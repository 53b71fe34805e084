use std::env;

/// Which popup an approved account with a pending recharge gets.
///
/// Two builds of the app shipped with different copy and thresholds for the
/// same moment; the switch keeps both without mixing their amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupVariant {
    /// "Account Approved" popup, recharge-stage amounts, flag write-back on exit.
    Recharge,
    /// "Account Reviewed" popup, reviewed-stage amounts, no write-back.
    Reviewed,
}

impl PopupVariant {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reviewed" => PopupVariant::Reviewed,
            _ => PopupVariant::Recharge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_cookie_name: String,

    pub store_backend: StoreBackend,
    pub popup_variant: PopupVariant,
    pub spin_animation_ms: u64,
    pub support_url: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "nrxpay".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());
    let jwt_cookie_name = env::var("JWT_COOKIE_NAME").unwrap_or_else(|_| "auth".to_string());

    let store_backend = match env::var("STORE_BACKEND").unwrap_or_default().trim() {
        "memory" => StoreBackend::Memory,
        _ => StoreBackend::Mongo,
    };

    let popup_variant = PopupVariant::parse(&env::var("POPUP_VARIANT").unwrap_or_default());

    let spin_animation_ms = env::var("SPIN_ANIMATION_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(4000);

    let support_url = env::var("SUPPORT_URL")
        .unwrap_or_else(|_| "https://t.me/NRXPAYSUPPORT".to_string());

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        jwt_cookie_name,
        store_backend,
        popup_variant,
        spin_animation_ms,
        support_url,
    }
}
