//! Cash event primitives.
//!
//! A `CashEvent` is the common currency of the engine: every heterogeneous
//! source (posted ledger row, pending row, recurring occurrence, installment,
//! plan, scenario overlay) is normalized into one dated, signed amount on one
//! account. Events are append-only; nothing mutates them after creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// Which source produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
    Posted,
    Pending,
    Recurring,
    Installment,
    Plan,
    Scenario,
}

impl EventOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posted => "posted",
            Self::Pending => "pending",
            Self::Recurring => "recurring",
            Self::Installment => "installment",
            Self::Plan => "plan",
            Self::Scenario => "scenario",
        }
    }
}

impl TryFrom<&str> for EventOrigin {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "posted" => Ok(Self::Posted),
            "pending" => Ok(Self::Pending),
            "recurring" => Ok(Self::Recurring),
            "installment" => Ok(Self::Installment),
            "plan" => Ok(Self::Plan),
            "scenario" => Ok(Self::Scenario),
            other => Err(EngineError::InvalidTemplate(format!(
                "invalid event origin: {other}"
            ))),
        }
    }
}

/// One dated, signed amount affecting one account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashEvent {
    pub date: NaiveDate,
    pub account_id: Uuid,
    /// Signed cents: income positive, expense negative. Never zero; zero
    /// amounts are dropped at normalization.
    pub amount: MoneyCents,
    pub origin: EventOrigin,
}

impl CashEvent {
    pub fn new(
        date: NaiveDate,
        account_id: Uuid,
        amount: MoneyCents,
        origin: EventOrigin,
    ) -> Self {
        Self {
            date,
            account_id,
            amount,
            origin,
        }
    }
}
