use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Withdrawal {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,
    pub amount_usdt: f64,
    pub amount_inr: f64,
    pub bank_account_id: ObjectId,
    pub usdt_rate: f64,

    // "ongoing" until an operator settles it
    pub status: String,

    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimumWithdrawalConfig {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub minimum_amount: f64,
    pub currency: String,
    pub is_active: bool,

    #[serde(default)]
    pub created_by: Option<ObjectId>,
}
