use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, UpdateOptions},
    Cursor, Database,
};
use serde::de::DeserializeOwned;

use crate::models::{
    Account, AccountType, BankAccount, CryptoRate, CryptoTransaction, MinimumWithdrawalConfig,
    SpinRecord, UsdtRates, UserBalance, UserProfile, Withdrawal,
};

use super::store::{Store, StoreResult};

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

async fn collect<T>(mut cursor: Cursor<T>) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut out: Vec<T> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res?);
    }
    Ok(out)
}

#[async_trait]
impl Store for MongoStore {
    async fn list_accounts(&self, user_id: ObjectId, account_type: AccountType) -> StoreResult<Vec<Account>> {
        let accounts = self.db.collection::<Account>(account_type.collection());
        // no sort: callers take the first approved record in natural order
        let cursor = accounts.find(doc! { "user_id": user_id }, None).await?;
        collect(cursor).await
    }

    async fn clear_recharge_popup(&self, account_type: AccountType, account_id: ObjectId) -> StoreResult<()> {
        let accounts = self.db.collection::<Account>(account_type.collection());
        accounts
            .update_one(
                doc! { "_id": account_id },
                doc! { "$set": { "show_recharge_popup": false } },
                None,
            )
            .await?;
        Ok(())
    }

    async fn usdt_rates(&self) -> StoreResult<Option<UsdtRates>> {
        let rates = self.db.collection::<UsdtRates>("usdt_rates");
        Ok(rates.find_one(doc! {}, None).await?)
    }

    async fn list_crypto_rates(&self) -> StoreResult<Vec<CryptoRate>> {
        let rates = self.db.collection::<CryptoRate>("crypto_rates");
        let find_opts = FindOptions::builder().sort(doc! { "crypto_type": 1 }).build();
        let cursor = rates.find(doc! { "is_active": true }, find_opts).await?;
        collect(cursor).await
    }

    async fn user_profile(&self, user_id: ObjectId) -> StoreResult<Option<UserProfile>> {
        let profiles = self.db.collection::<UserProfile>("user_data");
        Ok(profiles.find_one(doc! { "user_id": user_id }, None).await?)
    }

    async fn user_balance(&self, user_id: ObjectId) -> StoreResult<Option<UserBalance>> {
        let balances = self.db.collection::<UserBalance>("user_balances");
        Ok(balances.find_one(doc! { "user_id": user_id }, None).await?)
    }

    async fn list_bank_accounts(&self, user_id: ObjectId) -> StoreResult<Vec<BankAccount>> {
        let banks = self.db.collection::<BankAccount>("bank_accounts");
        let cursor = banks
            .find(doc! { "user_id": user_id, "is_active": true }, None)
            .await?;
        collect(cursor).await
    }

    async fn insert_withdrawal(&self, withdrawal: &Withdrawal) -> StoreResult<()> {
        let withdrawals = self.db.collection::<Withdrawal>("withdrawals");
        withdrawals.insert_one(withdrawal, None).await?;
        Ok(())
    }

    async fn list_withdrawals(&self, user_id: ObjectId, limit: i64) -> StoreResult<Vec<Withdrawal>> {
        let withdrawals = self.db.collection::<Withdrawal>("withdrawals");
        let find_opts = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();
        let cursor = withdrawals.find(doc! { "user_id": user_id }, find_opts).await?;
        collect(cursor).await
    }

    async fn insert_crypto_transaction(&self, tx: &CryptoTransaction) -> StoreResult<()> {
        let txs = self.db.collection::<CryptoTransaction>("crypto_transactions");
        txs.insert_one(tx, None).await?;
        Ok(())
    }

    async fn spin_record(&self, user_id: ObjectId) -> StoreResult<Option<SpinRecord>> {
        let spins = self.db.collection::<SpinRecord>("recharge_bonus_spins");
        Ok(spins.find_one(doc! { "user_id": user_id }, None).await?)
    }

    async fn record_spin(&self, record: &SpinRecord) -> StoreResult<(SpinRecord, bool)> {
        let spins = self.db.collection::<SpinRecord>("recharge_bonus_spins");

        // $setOnInsert: a second spin racing the first leaves the stored record alone
        let res = spins
            .update_one(
                doc! { "user_id": record.user_id },
                doc! {
                    "$setOnInsert": {
                        "user_id": record.user_id,
                        "bonus_percentage": record.bonus_percentage as i32,
                        "has_spun": record.has_spun,
                        "spun_at": record.spun_at,
                    }
                },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;

        let inserted = res.upserted_id.is_some();
        let stored = spins.find_one(doc! { "user_id": record.user_id }, None).await?;
        Ok((stored.unwrap_or_else(|| record.clone()), inserted))
    }

    async fn active_withdrawal_config(&self) -> StoreResult<Option<MinimumWithdrawalConfig>> {
        let configs = self.db.collection::<MinimumWithdrawalConfig>("minimum_withdrawal_config");
        Ok(configs.find_one(doc! { "is_active": true }, None).await?)
    }

    async fn save_withdrawal_config(&self, config: &MinimumWithdrawalConfig) -> StoreResult<()> {
        let configs = self.db.collection::<MinimumWithdrawalConfig>("minimum_withdrawal_config");
        configs
            .update_one(
                doc! { "_id": config.id },
                doc! {
                    "$set": {
                        "minimum_amount": config.minimum_amount,
                        "currency": &config.currency,
                        "is_active": config.is_active,
                    },
                    "$setOnInsert": { "created_by": config.created_by },
                },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
