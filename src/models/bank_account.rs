use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub user_id: ObjectId,
    pub account_number: String,
    pub account_holder_name: String,
    pub bank_name: String,

    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub ifsc_code: String,

    pub is_active: bool,
}

impl BankAccount {
    pub fn last4(&self) -> &str {
        let n = self.account_number.len();
        // account numbers are ascii digits
        self.account_number.get(n.saturating_sub(4)..).unwrap_or("")
    }
}
