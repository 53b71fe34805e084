use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRecord {
    // unique: one spin per user
    pub user_id: ObjectId,
    pub bonus_percentage: u32,
    pub has_spun: bool,
    pub spun_at: i64,
}
