use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoTransaction {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,
    #[serde(default)]
    pub username: Option<String>,

    pub crypto_type: String,
    pub crypto_symbol: String,
    pub quantity: f64,
    pub rate_inr: f64,
    pub total_inr: f64,

    // hash/id from the sender's wallet
    pub transaction_id: String,
    pub status: String,

    pub created_at: i64,
}
