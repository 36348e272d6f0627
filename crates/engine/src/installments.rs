//! Installment series and savings/goal plans.

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::installments::{InstallmentRow, PlanRow};
pub use api_types::installments::InstallmentSource;

use crate::{EngineError, MoneyCents, ResultEngine, horizon::parse_day};

/// A fixed-count series of equal monthly charges (credit-card purchase split
/// into parcels, or a loan repayment schedule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallmentGroup {
    pub installment_id: Uuid,
    pub account_id: Uuid,
    pub source: InstallmentSource,
    /// Number of charges. A non-positive stored count becomes 0 and the
    /// group contributes no occurrences.
    pub total_installments: u32,
    pub amount: MoneyCents,
    pub first_effective_date: NaiveDate,
}

impl TryFrom<&InstallmentRow> for InstallmentGroup {
    type Error = EngineError;

    fn try_from(row: &InstallmentRow) -> ResultEngine<Self> {
        Ok(Self {
            installment_id: row.installment_id,
            account_id: row.account_id,
            source: row.source,
            total_installments: u32::try_from(row.total_installments).unwrap_or(0),
            amount: MoneyCents::new(row.amount),
            first_effective_date: parse_day(&row.first_effective_date)?,
        })
    }
}

/// One scheduled installment of a savings/goal plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanInstallment {
    pub plan_id: Uuid,
    pub account_id: Uuid,
    pub due_date: NaiveDate,
    pub planned_amount: MoneyCents,
}

impl TryFrom<&PlanRow> for PlanInstallment {
    type Error = EngineError;

    fn try_from(row: &PlanRow) -> ResultEngine<Self> {
        Ok(Self {
            plan_id: row.plan_id,
            account_id: row.account_id,
            due_date: parse_day(&row.due_date)?,
            planned_amount: MoneyCents::new(row.planned_amount),
        })
    }
}
