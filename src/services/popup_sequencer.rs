//! One-modal-at-a-time popup state for account pages.
//!
//! The sequencer is pure: transitions return the effects the caller has to
//! perform (flag write-back, navigation) instead of performing them.

use mongodb::bson::oid::ObjectId;

use super::eligibility::PopupDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Hidden,
    RechargeVisible,
    InsufficientVisible,
    ReviewedVisible,
}

impl PopupState {
    pub fn name(self) -> &'static str {
        match self {
            PopupState::Hidden => "hidden",
            PopupState::RechargeVisible => "recharge",
            PopupState::InsufficientVisible => "insufficient",
            PopupState::ReviewedVisible => "reviewed",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "hidden" => Some(PopupState::Hidden),
            "recharge" => Some(PopupState::RechargeVisible),
            "insufficient" => Some(PopupState::InsufficientVisible),
            "reviewed" => Some(PopupState::ReviewedVisible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Close,
    Later,
    Cancel,
    Recharge,
    Support,
}

impl PopupAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "close" => Some(PopupAction::Close),
            "later" => Some(PopupAction::Later),
            "cancel" => Some(PopupAction::Cancel),
            "recharge" => Some(PopupAction::Recharge),
            "support" => Some(PopupAction::Support),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEffect {
    /// Write `show_recharge_popup = false` for this account.
    PersistDismissal(ObjectId),
    NavigateTo(&'static str),
}

pub const RECHARGE_PATH: &str = "/recharge";
pub const SUPPORT_PATH: &str = "/support-guide";

#[derive(Debug, Clone)]
pub struct PopupSequencer {
    state: PopupState,
    // account whose flag is cleared when the recharge popup goes away
    account_id: Option<ObjectId>,
}

impl Default for PopupSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupSequencer {
    pub fn new() -> Self {
        Self {
            state: PopupState::Hidden,
            account_id: None,
        }
    }

    /// Rebuilds a sequencer for a popup the page is currently showing.
    pub fn resume(state: PopupState, account_id: Option<ObjectId>) -> Self {
        Self { state, account_id }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn account_id(&self) -> Option<ObjectId> {
        self.account_id
    }

    /// Applies the evaluator's decision. Ignored while another popup is up.
    pub fn show(&mut self, decision: PopupDecision, account_id: Option<ObjectId>) -> PopupState {
        if self.state != PopupState::Hidden {
            return self.state;
        }

        self.state = match decision {
            PopupDecision::None => PopupState::Hidden,
            PopupDecision::ShowRechargePopup => PopupState::RechargeVisible,
            PopupDecision::ShowReviewedPopup => PopupState::ReviewedVisible,
            PopupDecision::ShowInsufficientMessage => PopupState::InsufficientVisible,
        };
        self.account_id = if self.state == PopupState::Hidden { None } else { account_id };
        self.state
    }

    /// Handles a user action on the visible popup and hides it.
    pub fn act(&mut self, action: PopupAction) -> Vec<PopupEffect> {
        let mut effects = vec![];

        if self.state == PopupState::Hidden {
            return effects;
        }

        // every way out of the recharge popup counts as having seen it
        if self.state == PopupState::RechargeVisible {
            if let Some(id) = self.account_id {
                effects.push(PopupEffect::PersistDismissal(id));
            }
        }

        match action {
            PopupAction::Recharge => effects.push(PopupEffect::NavigateTo(RECHARGE_PATH)),
            PopupAction::Support => effects.push(PopupEffect::NavigateTo(SUPPORT_PATH)),
            PopupAction::Close | PopupAction::Later | PopupAction::Cancel => {}
        }

        self.state = PopupState::Hidden;
        self.account_id = None;
        effects
    }
}
