//! Recurring bill/income templates.

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::recurring::RecurringRow;
pub use api_types::recurring::{FlowKind, Frequency, TemplateStatus};

use crate::{EngineError, MoneyCents, ResultEngine, horizon::parse_day};

/// A bill or income definition that recurs on a schedule.
///
/// The stored amount is a magnitude; the sign of every generated occurrence
/// comes from `kind` (`receita` positive, `despesa` negative).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurringTemplate {
    pub account_id: Uuid,
    pub frequency: Frequency,
    /// Scheduled day of month, 1–31. Clamped to the last valid day of short
    /// months when stepping; the clamp is re-derived at every step.
    pub day_of_month: u32,
    pub expected_amount: MoneyCents,
    pub next_due_date: NaiveDate,
    pub status: TemplateStatus,
    pub kind: FlowKind,
}

impl RecurringTemplate {
    pub fn is_active(&self) -> bool {
        self.status == TemplateStatus::Active
    }

    /// The amount of one occurrence, signed by the flow direction.
    pub fn signed_amount(&self) -> MoneyCents {
        match self.kind {
            FlowKind::Receita => self.expected_amount.abs(),
            FlowKind::Despesa => -self.expected_amount.abs(),
        }
    }
}

impl TryFrom<&RecurringRow> for RecurringTemplate {
    type Error = EngineError;

    fn try_from(row: &RecurringRow) -> ResultEngine<Self> {
        if !(1..=31).contains(&row.day_of_month) {
            return Err(EngineError::InvalidTemplate(format!(
                "day_of_month out of range: {}",
                row.day_of_month
            )));
        }
        Ok(Self {
            account_id: row.account_id,
            frequency: row.frequency,
            day_of_month: row.day_of_month,
            expected_amount: MoneyCents::new(row.expected_amount),
            next_due_date: parse_day(&row.next_due_date)?,
            status: row.status,
            kind: row.kind,
        })
    }
}
