pub mod home_controller;
pub mod account_controller;
pub mod wallet_controller;
pub mod crypto_controller;
pub mod spin_controller;
pub mod admin_controller;
pub mod realtime_controller;
