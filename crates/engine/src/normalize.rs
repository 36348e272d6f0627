//! Event normalization: heterogeneous rows into one flat event list.
//!
//! Every source the persistence layer hands over is folded into the common
//! [`CashEvent`] shape. A malformed row is skipped with a warning rather than
//! aborting the whole projection; one bad date must not blank out the chart.

use std::collections::BTreeSet;

use tracing::warn;
use uuid::Uuid;

use api_types::{
    forecast::SourceFlags,
    installments::{InstallmentRow, InstallmentSource, PlanRow},
    ledger::{TransactionRow, TransactionStatus},
    recurring::RecurringRow,
};

use crate::{
    CashEvent, EventOrigin, Horizon, MoneyCents,
    expand::{expand_installments, expand_plan, expand_recurring},
    horizon::parse_day,
    installments::{InstallmentGroup, PlanInstallment},
    recurring::RecurringTemplate,
};

/// Snapshot of raw rows for one forecasting request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceRows {
    pub transactions: Vec<TransactionRow>,
    pub recurring: Vec<RecurringRow>,
    pub installments: Vec<InstallmentRow>,
    pub plans: Vec<PlanRow>,
}

/// Normalizes every enabled source into a flat, append-only event list.
///
/// Posted and pending transactions map 1:1 (including dates outside the
/// horizon; the projection sweep and the provisioned splitter each pick what
/// they need). Recurring templates, installment groups and plans are expanded
/// into their in-horizon occurrences. Rows for unselected accounts are
/// dropped, and each source is gated by its [`SourceFlags`] toggle.
pub fn collect_events(
    rows: &SourceRows,
    selected: &BTreeSet<Uuid>,
    flags: &SourceFlags,
    horizon: &Horizon,
) -> Vec<CashEvent> {
    let mut events = Vec::new();

    for row in &rows.transactions {
        if !selected.contains(&row.account_id) {
            continue;
        }
        let date = match parse_day(&row.date) {
            Ok(date) => date,
            Err(err) => {
                warn!(error = %err, account = %row.account_id, "skipping transaction row");
                continue;
            }
        };
        let amount = MoneyCents::new(row.amount);
        if amount.is_zero() {
            continue;
        }
        let origin = match row.status {
            TransactionStatus::Posted => EventOrigin::Posted,
            TransactionStatus::Pending => EventOrigin::Pending,
        };
        events.push(CashEvent::new(date, row.account_id, amount, origin));
    }

    if flags.include_recurring {
        for row in &rows.recurring {
            if !selected.contains(&row.account_id) {
                continue;
            }
            match RecurringTemplate::try_from(row) {
                Ok(template) => events.extend(expand_recurring(&template, horizon)),
                Err(err) => {
                    warn!(error = %err, account = %row.account_id, "skipping recurring row");
                }
            }
        }
    }

    for row in &rows.installments {
        let included = match row.source {
            InstallmentSource::CreditCard => flags.include_credit_cards,
            InstallmentSource::Loan => flags.include_loans,
        };
        if !included || !selected.contains(&row.account_id) {
            continue;
        }
        match InstallmentGroup::try_from(row) {
            Ok(group) => events.extend(expand_installments(&group, horizon)),
            Err(err) => {
                warn!(error = %err, installment = %row.installment_id, "skipping installment row");
            }
        }
    }

    if flags.include_plans {
        for row in &rows.plans {
            if !plan_selected(flags, row) || !selected.contains(&row.account_id) {
                continue;
            }
            match PlanInstallment::try_from(row) {
                Ok(plan) => events.extend(expand_plan(&plan, horizon)),
                Err(err) => {
                    warn!(error = %err, plan = %row.plan_id, "skipping plan row");
                }
            }
        }
    }

    events
}

/// Empty allow-list means every plan.
fn plan_selected(flags: &SourceFlags, row: &PlanRow) -> bool {
    flags.selected_plan_ids.is_empty() || flags.selected_plan_ids.contains(&row.plan_id)
}
