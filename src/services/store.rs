//! Port to the hosted data store.
//!
//! Everything the app reads or writes goes through [`Store`]. The production
//! implementation is [`super::mongo_store::MongoStore`]; tests and local demos
//! use [`super::memory_store::MemoryStore`].

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{
    Account, AccountType, BankAccount, CryptoRate, CryptoTransaction, MinimumWithdrawalConfig,
    SpinRecord, UsdtRates, UserBalance, UserProfile, Withdrawal,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Accounts of one type owned by the user, in store order.
    async fn list_accounts(&self, user_id: ObjectId, account_type: AccountType) -> StoreResult<Vec<Account>>;

    /// Sets `show_recharge_popup = false` on one account record.
    async fn clear_recharge_popup(&self, account_type: AccountType, account_id: ObjectId) -> StoreResult<()>;

    async fn usdt_rates(&self) -> StoreResult<Option<UsdtRates>>;
    async fn list_crypto_rates(&self) -> StoreResult<Vec<CryptoRate>>;

    async fn user_profile(&self, user_id: ObjectId) -> StoreResult<Option<UserProfile>>;
    async fn user_balance(&self, user_id: ObjectId) -> StoreResult<Option<UserBalance>>;

    /// Active bank accounts only.
    async fn list_bank_accounts(&self, user_id: ObjectId) -> StoreResult<Vec<BankAccount>>;

    async fn insert_withdrawal(&self, withdrawal: &Withdrawal) -> StoreResult<()>;
    /// Newest first.
    async fn list_withdrawals(&self, user_id: ObjectId, limit: i64) -> StoreResult<Vec<Withdrawal>>;

    async fn insert_crypto_transaction(&self, tx: &CryptoTransaction) -> StoreResult<()>;

    async fn spin_record(&self, user_id: ObjectId) -> StoreResult<Option<SpinRecord>>;

    /// Inserts the record unless one already exists for the user. Returns
    /// whichever record is stored afterwards and whether this call inserted it.
    async fn record_spin(&self, record: &SpinRecord) -> StoreResult<(SpinRecord, bool)>;

    async fn active_withdrawal_config(&self) -> StoreResult<Option<MinimumWithdrawalConfig>>;
    async fn save_withdrawal_config(&self, config: &MinimumWithdrawalConfig) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}
