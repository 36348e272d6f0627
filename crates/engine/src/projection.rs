//! The projection sweep: events into a daily balance series.
//!
//! A single forward pass over the horizon, O(events + days). Balance at day
//! *n* depends only on day *n−1*'s balances and day *n*'s events; once the
//! sweep starts there is no re-sorting or backtracking.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CashEvent, Horizon, MoneyCents};

/// One day of the projected timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowDataPoint {
    pub date: NaiveDate,
    /// Sum of `per_account` for the day.
    pub total: MoneyCents,
    pub per_account: BTreeMap<Uuid, MoneyCents>,
}

/// Sweeps the horizon once, producing one data point per calendar day.
///
/// `opening` defines the selected account set and each account's balance as
/// of the horizon start; events for accounts absent from it are ignored, as
/// are events dated outside the horizon (pre-horizon ledger rows belong in
/// the opening balances, which the forecast facade derives). Events are
/// sorted by date with a stable sort, so same-day events keep their
/// normalization order.
///
/// An empty account selection yields an all-zero series; a degenerate
/// horizon yields no points at all.
pub fn project(
    events: &[CashEvent],
    opening: &BTreeMap<Uuid, MoneyCents>,
    horizon: &Horizon,
) -> Vec<CashFlowDataPoint> {
    if horizon.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&CashEvent> = events
        .iter()
        .filter(|event| horizon.contains(event.date))
        .collect();
    ordered.sort_by_key(|event| event.date);

    let mut balances = opening.clone();
    let mut points = Vec::with_capacity(horizon.len());
    let mut cursor = ordered.iter().peekable();

    for day in horizon.days() {
        while let Some(event) = cursor.peek() {
            if event.date > day {
                break;
            }
            if let Some(balance) = balances.get_mut(&event.account_id) {
                *balance += event.amount;
            }
            cursor.next();
        }
        let total = balances.values().copied().sum();
        points.push(CashFlowDataPoint {
            date: day,
            total,
            per_account: balances.clone(),
        });
    }

    points
}
