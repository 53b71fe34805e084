//! One-time recharge bonus spin.
//!
//! The wheel shows eight prize slots but always lands on slot 0. A user gets
//! one spin; the stored record is keyed by user id and never overwritten.

use std::time::Duration;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{models::SpinRecord, AppState};

use super::auth_service::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPrize {
    pub percentage: u32,
    pub angle: u32,
    pub color: &'static str,
}

pub const PRIZES: [SpinPrize; 8] = [
    SpinPrize { percentage: 20, angle: 0, color: "yellow" },
    SpinPrize { percentage: 5, angle: 45, color: "pink" },
    SpinPrize { percentage: 10, angle: 90, color: "purple" },
    SpinPrize { percentage: 1, angle: 135, color: "blue" },
    SpinPrize { percentage: 15, angle: 180, color: "green" },
    SpinPrize { percentage: 30, angle: 225, color: "red" },
    SpinPrize { percentage: 25, angle: 270, color: "indigo" },
    SpinPrize { percentage: 40, angle: 315, color: "orange" },
];

pub const WINNING_SLOT: usize = 0;
const FULL_SPINS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    NotChecked,
    CanSpin,
    SpinInProgress,
    Spun(u32),
}

#[derive(Debug, Clone)]
pub struct SpinWheel {
    state: SpinState,
}

impl Default for SpinWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinWheel {
    pub fn new() -> Self {
        Self { state: SpinState::NotChecked }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Applies the stored record read on open.
    pub fn checked(&mut self, record: Option<&SpinRecord>) -> SpinState {
        self.state = match record {
            Some(r) if r.has_spun => SpinState::Spun(r.bonus_percentage),
            _ => SpinState::CanSpin,
        };
        self.state
    }

    /// Starts the spin. Returns false when a spin is not allowed right now.
    pub fn begin(&mut self) -> bool {
        if self.state != SpinState::CanSpin {
            return false;
        }
        self.state = SpinState::SpinInProgress;
        true
    }

    /// Ends the animation on the fixed winning slot.
    pub fn resolve(&mut self) -> u32 {
        let bonus = PRIZES[WINNING_SLOT].percentage;
        if self.state == SpinState::SpinInProgress {
            self.state = SpinState::Spun(bonus);
        }
        bonus
    }
}

/// Wheel rotation in degrees that lands on the winning slot.
pub fn final_rotation() -> u32 {
    360 * FULL_SPINS + PRIZES[WINNING_SLOT].angle
}

#[derive(Debug, Clone)]
pub struct SpinOutcome {
    pub state: SpinState,
    /// True when this call produced the win (as opposed to an earlier spin).
    pub newly_won: bool,
    /// Message when the win could not be stored.
    pub record_error: Option<String>,
}

pub async fn check_spin_status(state: &AppState, user_id: ObjectId) -> SpinWheel {
    let mut wheel = SpinWheel::new();
    match state.store.spin_record(user_id).await {
        Ok(record) => {
            wheel.checked(record.as_ref());
        }
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "error checking spin status");
            wheel.checked(None);
        }
    }
    wheel
}

pub async fn spin(state: &AppState, user_id: Option<ObjectId>) -> Result<SpinOutcome, FieldErrors> {
    let mut errs = FieldErrors::new();

    let Some(user_id) = user_id else {
        errs.insert("_form".into(), "Please log in to spin.".into());
        return Err(errs);
    };

    let mut wheel = check_spin_status(state, user_id).await;
    if !wheel.begin() {
        return Ok(SpinOutcome {
            state: wheel.state(),
            newly_won: false,
            record_error: None,
        });
    }

    tokio::time::sleep(Duration::from_millis(state.settings.spin_animation_ms)).await;
    let bonus = wheel.resolve();

    let record = SpinRecord {
        user_id,
        bonus_percentage: bonus,
        has_spun: true,
        spun_at: Utc::now().timestamp(),
    };

    match state.store.record_spin(&record).await {
        Ok((stored, newly_won)) => {
            // a concurrent spin may have stored first; report what is stored
            tracing::info!(%user_id, bonus = stored.bonus_percentage, newly_won, "recharge bonus spin recorded");
            Ok(SpinOutcome {
                state: SpinState::Spun(stored.bonus_percentage),
                newly_won,
                record_error: None,
            })
        }
        Err(e) => {
            tracing::error!(%user_id, error = %e, "error recording spin");
            Ok(SpinOutcome {
                state: wheel.state(),
                newly_won: true,
                record_error: Some("Failed to record your spin. Please contact support.".to_string()),
            })
        }
    }
}
