pub mod store;
pub mod mongo_store;
pub mod memory_store;
pub mod db_init;

pub mod auth_service;
pub mod account_service;
pub mod amounts;
pub mod eligibility;
pub mod popup_sequencer;
pub mod seen_popups;
pub mod rates_service;
pub mod spin_service;
pub mod wallet_service;
pub mod crypto_service;
pub mod withdrawal_config_service;
