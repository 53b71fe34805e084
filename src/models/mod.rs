pub mod user;
pub mod account;
pub mod rate;
pub mod bank_account;
pub mod withdrawal;
pub mod crypto_transaction;
pub mod spin;

pub use user::{CurrentUser, UserBalance, UserProfile, UserStatus};
pub use account::{Account, AccountStatus, AccountType};
pub use rate::{CryptoRate, UsdtRates};
pub use bank_account::BankAccount;
pub use withdrawal::{MinimumWithdrawalConfig, Withdrawal};
pub use crypto_transaction::CryptoTransaction;
pub use spin::SpinRecord;
