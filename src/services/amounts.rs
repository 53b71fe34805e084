//! Minimum recharge amounts shown on popups.
//!
//! These are published figures. Each popup stage has its own table and they
//! are intentionally not unified.

use crate::models::AccountType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountStage {
    /// "Account Reviewed" popup.
    Reviewed,
    /// "Account Approved" and insufficient-recharge popups.
    Recharge,
    /// Home page attention popup.
    Attention,
}

pub fn recharge_amount(account_type: AccountType, stage: AmountStage) -> &'static str {
    match (stage, account_type) {
        (AmountStage::Reviewed, AccountType::Savings) => "$200",
        (AmountStage::Reviewed, AccountType::Current) => "$600",
        (AmountStage::Reviewed, AccountType::Corporate) => "$2000",

        (AmountStage::Recharge, AccountType::Savings) => "$300",
        (AmountStage::Recharge, AccountType::Current) => "$700",
        (AmountStage::Recharge, AccountType::Corporate) => "$2000",

        (AmountStage::Attention, AccountType::Savings) => "$200",
        (AmountStage::Attention, AccountType::Current) => "$500",
        (AmountStage::Attention, AccountType::Corporate) => "$2000",
    }
}

/// Same as [`recharge_amount`] for a raw type name; unknown names give `$0`.
pub fn resolve(account_type: &str, stage: AmountStage) -> &'static str {
    match account_type.parse::<AccountType>() {
        Ok(t) => recharge_amount(t, stage),
        Err(_) => "$0",
    }
}
