//! In-process [`Store`] used by tests and by `STORE_BACKEND=memory`.
//!
//! Reads and writes can be made to fail on demand so the degrade paths can be
//! driven without a real database.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{
    Account, AccountType, BankAccount, CryptoRate, CryptoTransaction, MinimumWithdrawalConfig,
    SpinRecord, UsdtRates, UserBalance, UserProfile, Withdrawal,
};

use super::store::{Store, StoreError, StoreResult};

#[derive(Default)]
struct Data {
    accounts: HashMap<AccountType, Vec<Account>>,
    usdt_rates: Option<UsdtRates>,
    crypto_rates: Vec<CryptoRate>,
    profiles: Vec<UserProfile>,
    balances: Vec<UserBalance>,
    banks: Vec<BankAccount>,
    withdrawals: Vec<Withdrawal>,
    crypto_txs: Vec<CryptoTransaction>,
    spins: Vec<SpinRecord>,
    configs: Vec<MinimumWithdrawalConfig>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, Data> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    // ---------------- seeding ----------------

    pub fn add_account(&self, account_type: AccountType, account: Account) {
        self.data().accounts.entry(account_type).or_default().push(account);
    }

    pub fn set_usdt_rates(&self, rates: UsdtRates) {
        self.data().usdt_rates = Some(rates);
    }

    pub fn add_crypto_rate(&self, rate: CryptoRate) {
        self.data().crypto_rates.push(rate);
    }

    pub fn add_profile(&self, profile: UserProfile) {
        self.data().profiles.push(profile);
    }

    pub fn set_balance(&self, balance: UserBalance) {
        let mut data = self.data();
        data.balances.retain(|b| b.user_id != balance.user_id);
        data.balances.push(balance);
    }

    pub fn add_bank_account(&self, bank: BankAccount) {
        self.data().banks.push(bank);
    }

    // ---------------- inspection ----------------

    pub fn account(&self, account_type: AccountType, id: ObjectId) -> Option<Account> {
        self.data()
            .accounts
            .get(&account_type)
            .and_then(|list| list.iter().find(|a| a.id == id).cloned())
    }

    pub fn withdrawals(&self) -> Vec<Withdrawal> {
        self.data().withdrawals.clone()
    }

    pub fn crypto_transactions(&self) -> Vec<CryptoTransaction> {
        self.data().crypto_txs.clone()
    }

    pub fn spin_records(&self) -> Vec<SpinRecord> {
        self.data().spins.clone()
    }

    pub fn withdrawal_configs(&self) -> Vec<MinimumWithdrawalConfig> {
        self.data().configs.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_accounts(&self, user_id: ObjectId, account_type: AccountType) -> StoreResult<Vec<Account>> {
        self.check_read()?;
        Ok(self
            .data()
            .accounts
            .get(&account_type)
            .map(|list| list.iter().filter(|a| a.user_id == user_id).cloned().collect())
            .unwrap_or_default())
    }

    async fn clear_recharge_popup(&self, account_type: AccountType, account_id: ObjectId) -> StoreResult<()> {
        self.check_write()?;
        let mut data = self.data();
        if let Some(acc) = data
            .accounts
            .get_mut(&account_type)
            .and_then(|list| list.iter_mut().find(|a| a.id == account_id))
        {
            acc.show_recharge_popup = false;
        }
        Ok(())
    }

    async fn usdt_rates(&self) -> StoreResult<Option<UsdtRates>> {
        self.check_read()?;
        Ok(self.data().usdt_rates.clone())
    }

    async fn list_crypto_rates(&self) -> StoreResult<Vec<CryptoRate>> {
        self.check_read()?;
        Ok(self.data().crypto_rates.iter().filter(|r| r.is_active).cloned().collect())
    }

    async fn user_profile(&self, user_id: ObjectId) -> StoreResult<Option<UserProfile>> {
        self.check_read()?;
        Ok(self.data().profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn user_balance(&self, user_id: ObjectId) -> StoreResult<Option<UserBalance>> {
        self.check_read()?;
        Ok(self.data().balances.iter().find(|b| b.user_id == user_id).cloned())
    }

    async fn list_bank_accounts(&self, user_id: ObjectId) -> StoreResult<Vec<BankAccount>> {
        self.check_read()?;
        Ok(self
            .data()
            .banks
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active)
            .cloned()
            .collect())
    }

    async fn insert_withdrawal(&self, withdrawal: &Withdrawal) -> StoreResult<()> {
        self.check_write()?;
        self.data().withdrawals.push(withdrawal.clone());
        Ok(())
    }

    async fn list_withdrawals(&self, user_id: ObjectId, limit: i64) -> StoreResult<Vec<Withdrawal>> {
        self.check_read()?;
        let mut out: Vec<Withdrawal> = self
            .data()
            .withdrawals
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        // equal timestamps: newest insert first
        out.reverse();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(limit.max(0) as usize);
        Ok(out)
    }

    async fn insert_crypto_transaction(&self, tx: &CryptoTransaction) -> StoreResult<()> {
        self.check_write()?;
        self.data().crypto_txs.push(tx.clone());
        Ok(())
    }

    async fn spin_record(&self, user_id: ObjectId) -> StoreResult<Option<SpinRecord>> {
        self.check_read()?;
        Ok(self.data().spins.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn record_spin(&self, record: &SpinRecord) -> StoreResult<(SpinRecord, bool)> {
        self.check_write()?;
        let mut data = self.data();
        if let Some(existing) = data.spins.iter().find(|s| s.user_id == record.user_id) {
            return Ok((existing.clone(), false));
        }
        data.spins.push(record.clone());
        Ok((record.clone(), true))
    }

    async fn active_withdrawal_config(&self) -> StoreResult<Option<MinimumWithdrawalConfig>> {
        self.check_read()?;
        Ok(self.data().configs.iter().find(|c| c.is_active).cloned())
    }

    async fn save_withdrawal_config(&self, config: &MinimumWithdrawalConfig) -> StoreResult<()> {
        self.check_write()?;
        let mut data = self.data();
        match data.configs.iter_mut().find(|c| c.id == config.id) {
            Some(existing) => {
                existing.minimum_amount = config.minimum_amount;
                existing.currency = config.currency.clone();
                existing.is_active = config.is_active;
            }
            None => data.configs.push(config.clone()),
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_read()
    }
}
