use mongodb::bson::oid::ObjectId;

use crate::{
    models::{Account, AccountType, UserStatus},
    AppState,
};

/// Accounts of one type plus an optional notice when the read failed.
#[derive(Debug, Clone, Default)]
pub struct AccountsView {
    pub accounts: Vec<Account>,
    pub notice: Option<String>,
}

/// Reads the user's accounts of one type. A failed read degrades to an empty
/// list with a notice; it never fails the page.
pub async fn list_accounts(state: &AppState, user_id: ObjectId, account_type: AccountType) -> AccountsView {
    match state.store.list_accounts(user_id, account_type).await {
        Ok(accounts) => AccountsView { accounts, notice: None },
        Err(e) => {
            tracing::warn!(%user_id, %account_type, error = %e, "failed to load accounts");
            AccountsView {
                accounts: vec![],
                notice: Some("Failed to load your accounts. Please try again.".to_string()),
            }
        }
    }
}

/// Clears `show_recharge_popup` for one account. Best effort: errors are
/// logged and swallowed, the caller closes the popup either way.
pub async fn persist_popup_dismissal(state: &AppState, account_type: AccountType, account_id: ObjectId) {
    match state.store.clear_recharge_popup(account_type, account_id).await {
        Ok(()) => tracing::debug!(%account_type, %account_id, "recharge popup flag cleared"),
        Err(e) => tracing::warn!(%account_type, %account_id, error = %e, "error updating popup flag"),
    }
}

pub async fn is_suspended(state: &AppState, user_id: ObjectId) -> bool {
    match state.store.user_profile(user_id).await {
        Ok(Some(p)) => p.status == UserStatus::Suspended,
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "failed to load user profile");
            false
        }
    }
}
