use std::{fmt, str::FromStr};

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Current,
    Corporate,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [AccountType::Savings, AccountType::Current, AccountType::Corporate];

    /// Backing collection in the hosted store.
    pub fn collection(self) -> &'static str {
        match self {
            AccountType::Savings => "savings_accounts",
            AccountType::Current => "current_accounts",
            AccountType::Corporate => "corporate_accounts",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Current => "current",
            AccountType::Corporate => "corporate",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            "corporate" => Ok(AccountType::Corporate),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    // set by the admin review flow, never by this app
    pub status: AccountStatus,

    #[serde(default)]
    pub show_recharge_popup: bool,

    // set by support when a recharge came in below the required amount
    #[serde(default)]
    pub insufficient_recharge: bool,

    #[serde(default)]
    pub created_at: i64,
}
