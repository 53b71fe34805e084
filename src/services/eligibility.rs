use crate::{
    config::PopupVariant,
    models::{Account, AccountStatus},
};

/// What an account page should show on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDecision {
    None,
    ShowRechargePopup,
    ShowReviewedPopup,
    ShowInsufficientMessage,
}

/// The approved account that drives the popup. With several approved
/// accounts of one type the first in store order is used.
pub fn approved_account(accounts: &[Account]) -> Option<&Account> {
    accounts.iter().find(|a| a.status == AccountStatus::Approved)
}

pub fn evaluate(accounts: &[Account], variant: PopupVariant) -> PopupDecision {
    let Some(acc) = approved_account(accounts) else {
        return PopupDecision::None;
    };

    if acc.show_recharge_popup {
        return match variant {
            PopupVariant::Recharge => PopupDecision::ShowRechargePopup,
            PopupVariant::Reviewed => PopupDecision::ShowReviewedPopup,
        };
    }

    if acc.insufficient_recharge {
        return PopupDecision::ShowInsufficientMessage;
    }

    PopupDecision::None
}
