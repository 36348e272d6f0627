//! Current-liquidity headline figures.
//!
//! A straight partition of the already-known ledger events: no forward
//! projection, just "where do I stand right now, counting what I know is
//! coming".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CashEvent, EventOrigin, MoneyCents};

/// Completed vs. provisioned split of the current balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedTotals {
    /// Sum of posted events dated up to and including `today`.
    pub completed_balance: MoneyCents,
    /// Sum of positive pending events.
    pub pending_income: MoneyCents,
    /// Sum of negative pending events.
    pub pending_expense: MoneyCents,
    /// `pending_income + pending_expense`.
    pub provisions_amount: MoneyCents,
}

/// Partitions normalized ledger events into the headline totals.
///
/// Only `Posted` and `Pending` events participate; expanded occurrences and
/// scenario overlays are projection material, not current liquidity.
pub fn split_provisioned(events: &[CashEvent], today: NaiveDate) -> ProvisionedTotals {
    let mut totals = ProvisionedTotals::default();
    for event in events {
        match event.origin {
            EventOrigin::Posted => {
                if event.date <= today {
                    totals.completed_balance += event.amount;
                }
            }
            EventOrigin::Pending => {
                if event.amount.is_positive() {
                    totals.pending_income += event.amount;
                } else {
                    totals.pending_expense += event.amount;
                }
            }
            _ => {}
        }
    }
    totals.provisions_amount = totals.pending_income + totals.pending_expense;
    totals
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::horizon::parse_day;

    use super::*;

    fn event(date: &str, cents: i64, origin: EventOrigin) -> CashEvent {
        CashEvent::new(
            parse_day(date).unwrap(),
            Uuid::new_v4(),
            MoneyCents::new(cents),
            origin,
        )
    }

    #[test]
    fn partitions_posted_and_pending() {
        let today = parse_day("2024-06-15").unwrap();
        let events = [
            event("2024-06-01", 100_000, EventOrigin::Posted),
            event("2024-06-10", -40_000, EventOrigin::Posted),
            // Posted but future-dated: not yet part of the completed balance.
            event("2024-06-20", -10_000, EventOrigin::Posted),
            event("2024-06-18", 25_000, EventOrigin::Pending),
            event("2024-06-25", -5_000, EventOrigin::Pending),
            // Projection material is ignored here.
            event("2024-06-16", -99_000, EventOrigin::Recurring),
        ];
        let totals = split_provisioned(&events, today);
        assert_eq!(totals.completed_balance, MoneyCents::new(60_000));
        assert_eq!(totals.pending_income, MoneyCents::new(25_000));
        assert_eq!(totals.pending_expense, MoneyCents::new(-5_000));
        assert_eq!(totals.provisions_amount, MoneyCents::new(20_000));
    }

    #[test]
    fn no_events_means_all_zero() {
        let totals = split_provisioned(&[], parse_day("2024-06-15").unwrap());
        assert_eq!(totals, ProvisionedTotals::default());
    }
}
