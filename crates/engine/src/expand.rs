//! Occurrence expansion: one template into its dated occurrences.
//!
//! Turns a [`RecurringTemplate`], [`InstallmentGroup`] or [`PlanInstallment`]
//! into the concrete [`CashEvent`]s that fall inside a [`Horizon`]. Month
//! stepping clamps the scheduled day to the last valid day of the target
//! month, and the clamp is re-derived from the scheduled day at every step so
//! a February occurrence never drags later months back to the 28th.

use chrono::{Datelike, Days, NaiveDate};

use crate::{
    CashEvent, EventOrigin, Horizon,
    installments::{InstallmentGroup, PlanInstallment},
    recurring::{Frequency, RecurringTemplate},
};

/// Last calendar day of the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// `anchor` shifted forward by `months`, landing on `day_of_month` clamped to
/// the target month's length. `None` only on date overflow.
pub(crate) fn add_months_clamped(
    anchor: NaiveDate,
    months: u32,
    day_of_month: u32,
) -> Option<NaiveDate> {
    let index = anchor.year() as i64 * 12 + i64::from(anchor.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = day_of_month.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Expands a recurring template into its occurrences inside the horizon.
///
/// Inactive templates and zero amounts contribute nothing. The cursor starts
/// at `next_due_date` (emitted as-is), then steps by the template period;
/// occurrences before the horizon start are skipped, the walk stops past the
/// horizon end.
pub fn expand_recurring(template: &RecurringTemplate, horizon: &Horizon) -> Vec<CashEvent> {
    if !template.is_active() || template.expected_amount.is_zero() {
        return Vec::new();
    }

    let amount = template.signed_amount();
    let mut occurrences = Vec::new();
    let mut push = |date: NaiveDate| {
        if horizon.contains(date) {
            occurrences.push(CashEvent::new(
                date,
                template.account_id,
                amount,
                EventOrigin::Recurring,
            ));
        }
    };

    match template.frequency {
        Frequency::Weekly => {
            let mut cursor = template.next_due_date;
            while cursor <= horizon.end() {
                push(cursor);
                cursor = match cursor.checked_add_days(Days::new(7)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        Frequency::Monthly | Frequency::Quarterly | Frequency::Yearly => {
            let step = match template.frequency {
                Frequency::Monthly => 1,
                Frequency::Quarterly => 3,
                _ => 12,
            };
            let mut cursor = template.next_due_date;
            let mut elapsed = 0u32;
            while cursor <= horizon.end() {
                push(cursor);
                elapsed += step;
                // Re-derive from the anchor and scheduled day so a clamped
                // short-month occurrence does not shift later ones.
                cursor = match add_months_clamped(
                    template.next_due_date,
                    elapsed,
                    template.day_of_month,
                ) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    occurrences
}

/// Emits the installments of a group that fall inside the horizon.
///
/// Installment *i* (0-based) is dated `first_effective_date + i` months, the
/// day clamped like any month step. Occurrences outside the horizon are not
/// emitted but still count toward the group's fixed total, so a narrow
/// horizon sees a strict subset, never a reflowed series.
pub fn expand_installments(group: &InstallmentGroup, horizon: &Horizon) -> Vec<CashEvent> {
    if group.amount.is_zero() {
        return Vec::new();
    }
    (0..group.total_installments)
        .filter_map(|offset| {
            add_months_clamped(
                group.first_effective_date,
                offset,
                group.first_effective_date.day(),
            )
        })
        .filter(|date| horizon.contains(*date))
        .map(|date| CashEvent::new(date, group.account_id, group.amount, EventOrigin::Installment))
        .collect()
}

/// A plan installment contributes one event at its due date, if in horizon.
pub fn expand_plan(plan: &PlanInstallment, horizon: &Horizon) -> Option<CashEvent> {
    if plan.planned_amount.is_zero() || !horizon.contains(plan.due_date) {
        return None;
    }
    Some(CashEvent::new(
        plan.due_date,
        plan.account_id,
        plan.planned_amount,
        EventOrigin::Plan,
    ))
}
