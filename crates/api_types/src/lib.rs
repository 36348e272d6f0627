//! Data-transfer types for the forecasting engine boundary.
//!
//! The persistence layer hands the engine raw rows; these are their shapes.
//! Dates cross the boundary as ISO 8601 date strings (`YYYY-MM-DD`) and are
//! parsed inside the engine, so a single malformed row can be skipped without
//! failing the whole payload. Amounts are signed integer cents.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod ledger {
    use super::*;

    /// Posting state of a ledger row.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionStatus {
        /// Effective: already reflected in the account balance.
        Posted,
        /// Known but not yet effective (provisioned).
        Pending,
    }

    impl TransactionStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Posted => "posted",
                Self::Pending => "pending",
            }
        }
    }

    /// One posted or pending transaction as stored.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TransactionRow {
        pub account_id: Uuid,
        /// Signed cents: income positive, expense negative.
        pub amount: i64,
        /// ISO 8601 calendar day.
        pub date: String,
        pub status: TransactionStatus,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Frequency {
        Weekly,
        Monthly,
        Quarterly,
        Yearly,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TemplateStatus {
        Active,
        Paused,
        Cancelled,
    }

    /// Direction of a recurring flow, in the product's own vocabulary.
    ///
    /// `receita` is income (positive), `despesa` is expense (negative).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum FlowKind {
        Receita,
        Despesa,
    }

    impl FlowKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Receita => "receita",
                Self::Despesa => "despesa",
            }
        }
    }

    /// One recurring bill/income definition as stored.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RecurringRow {
        pub account_id: Uuid,
        pub frequency: Frequency,
        /// Scheduled day of month, 1–31; clamped to short months on expansion.
        pub day_of_month: u32,
        /// Magnitude in cents; sign comes from `kind`.
        pub expected_amount: i64,
        /// ISO 8601 calendar day of the next expected occurrence.
        pub next_due_date: String,
        pub status: TemplateStatus,
        #[serde(rename = "type")]
        pub kind: FlowKind,
    }
}

pub mod installments {
    use super::*;

    /// Which product an installment series belongs to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InstallmentSource {
        CreditCard,
        Loan,
    }

    /// A fixed-count series of equal monthly charges.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct InstallmentRow {
        pub installment_id: Uuid,
        pub account_id: Uuid,
        pub source: InstallmentSource,
        pub total_installments: i32,
        /// Signed cents per installment (charges are negative).
        pub amount: i64,
        /// ISO 8601 calendar day of the first charge.
        pub first_effective_date: String,
    }

    /// One scheduled installment of a savings/goal plan.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PlanRow {
        pub plan_id: Uuid,
        pub account_id: Uuid,
        /// ISO 8601 calendar day the installment falls due.
        pub due_date: String,
        /// Signed cents (money earmarked is negative).
        pub planned_amount: i64,
    }
}

pub mod forecast {
    use super::*;

    /// Inclusive date range of a projection, ISO 8601 at the boundary.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HorizonRange {
        pub start_date: String,
        pub end_date: String,
    }

    /// Per-source toggles so different forecast views compose without
    /// re-fetching.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SourceFlags {
        pub include_recurring: bool,
        pub include_credit_cards: bool,
        pub include_loans: bool,
        pub include_plans: bool,
        /// Allow-list of plan ids; empty means every plan (when included).
        #[serde(default)]
        pub selected_plan_ids: Vec<Uuid>,
    }

    impl Default for SourceFlags {
        fn default() -> Self {
            Self {
                include_recurring: true,
                include_credit_cards: true,
                include_loans: true,
                include_plans: true,
                selected_plan_ids: Vec::new(),
            }
        }
    }
}

pub mod scenario {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AdjustmentKind {
        ExpenseReduction,
        IncomeIncrease,
        SavingsGoal,
        ExtraPayment,
    }

    impl AdjustmentKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::ExpenseReduction => "expense_reduction",
                Self::IncomeIncrease => "income_increase",
                Self::SavingsGoal => "savings_goal",
                Self::ExtraPayment => "extra_payment",
            }
        }
    }

    /// One user hypothesis to overlay on the baseline projection.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AdjustmentRow {
        #[serde(rename = "type")]
        pub kind: AdjustmentKind,
        /// Magnitude in cents; the engine derives the sign from `kind`.
        pub amount: i64,
        #[serde(default)]
        pub description: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurring_row_uses_product_vocabulary() {
        let json = r#"{
            "account_id": "6f9fdb7c-3e3c-4d27-9f20-95e9e04a9d3b",
            "frequency": "monthly",
            "day_of_month": 31,
            "expected_amount": 12000,
            "next_due_date": "2024-01-31",
            "status": "active",
            "type": "despesa"
        }"#;
        let row: recurring::RecurringRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, recurring::FlowKind::Despesa);
        assert_eq!(row.frequency, recurring::Frequency::Monthly);
        assert_eq!(row.day_of_month, 31);
    }

    #[test]
    fn adjustment_kind_round_trips_snake_case() {
        let row: scenario::AdjustmentRow =
            serde_json::from_str(r#"{"type": "expense_reduction", "amount": 20000}"#).unwrap();
        assert_eq!(row.kind, scenario::AdjustmentKind::ExpenseReduction);
        assert_eq!(row.kind.as_str(), "expense_reduction");
        assert!(row.description.is_empty());
    }

    #[test]
    fn source_flags_default_includes_everything() {
        let flags = forecast::SourceFlags::default();
        assert!(flags.include_recurring && flags.include_plans);
        assert!(flags.selected_plan_ids.is_empty());
    }
}
