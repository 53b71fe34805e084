use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use crate::models::AccountType;

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // recharge_bonus_spins: one record per user
    {
        let col = db.collection::<mongodb::bson::Document>("recharge_bonus_spins");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // account collections: looked up by owner on every page load
    for account_type in AccountType::ALL {
        let col = db.collection::<mongodb::bson::Document>(account_type.collection());
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // withdrawals: history by user, newest first
    {
        let col = db.collection::<mongodb::bson::Document>("withdrawals");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // crypto_transactions: operators look up by the sender's transaction id
    {
        let col = db.collection::<mongodb::bson::Document>("crypto_transactions");
        let model = IndexModel::builder()
            .keys(doc! { "transaction_id": 1 })
            .build();

        let _ = col.create_index(model, None).await;
    }

    Ok(())
}
