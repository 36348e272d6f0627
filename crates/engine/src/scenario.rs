//! What-if scenario simulation.
//!
//! Adjustments never get their own balance arithmetic: each one is turned
//! into synthetic [`CashEvent`]s, appended to the baseline's events, and the
//! same projection sweep is re-run. The sweep stays the single source of
//! truth for running balances, and the scenario series is diffed against the
//! baseline afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use api_types::scenario::AdjustmentRow;
pub use api_types::scenario::AdjustmentKind;

use crate::{
    CashEvent, EventOrigin, Horizon, MoneyCents,
    projection::{CashFlowDataPoint, project},
};

/// One user hypothesis to overlay on the baseline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    pub kind: AdjustmentKind,
    /// Magnitude in cents; the sign comes from `kind`.
    pub amount: MoneyCents,
    pub description: String,
}

impl From<&AdjustmentRow> for ScenarioAdjustment {
    fn from(row: &AdjustmentRow) -> Self {
        Self {
            kind: row.kind,
            amount: MoneyCents::new(row.amount).abs(),
            description: row.description.clone(),
        }
    }
}

/// Difference between the scenario series and the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioImpact {
    /// Scenario end balance minus baseline end balance.
    pub total_improvement: MoneyCents,
    /// Scenario worst-day balance minus baseline worst-day balance.
    pub worst_day_improvement: MoneyCents,
    /// Days at or above zero gained; negative when the adjustments are a net
    /// drain (a savings goal with no offsetting income).
    pub days_above_zero_gained: i64,
}

/// Output of applying a list of adjustments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario_points: Vec<CashFlowDataPoint>,
    pub impact: ScenarioImpact,
}

/// Expands adjustments into synthetic events inside the horizon.
///
/// Monthly kinds fire once on the 1st of every calendar month the horizon
/// contains; `ExtraPayment` fires exactly once, on the horizon start.
/// Synthetic events land on `account`; with no account to land on (empty
/// selection) nothing is synthesized, keeping the all-zero-series contract.
pub fn synthesize_events(
    adjustments: &[ScenarioAdjustment],
    horizon: &Horizon,
    account: Option<Uuid>,
) -> Vec<CashEvent> {
    let Some(account) = account else {
        return Vec::new();
    };
    if horizon.is_empty() {
        return Vec::new();
    }

    let month_firsts = horizon.month_firsts();
    let mut events = Vec::new();
    for adjustment in adjustments {
        let magnitude = adjustment.amount.abs();
        if magnitude.is_zero() {
            continue;
        }
        match adjustment.kind {
            // Reducing a cost frees cash, so it lands as a positive amount.
            AdjustmentKind::ExpenseReduction | AdjustmentKind::IncomeIncrease => {
                for date in &month_firsts {
                    events.push(CashEvent::new(
                        *date,
                        account,
                        magnitude,
                        EventOrigin::Scenario,
                    ));
                }
            }
            AdjustmentKind::SavingsGoal => {
                for date in &month_firsts {
                    events.push(CashEvent::new(
                        *date,
                        account,
                        -magnitude,
                        EventOrigin::Scenario,
                    ));
                }
            }
            AdjustmentKind::ExtraPayment => {
                events.push(CashEvent::new(
                    horizon.start(),
                    account,
                    -magnitude,
                    EventOrigin::Scenario,
                ));
            }
        }
    }
    events
}

/// Re-runs the projection with synthetic events injected and diffs the
/// result against the baseline.
///
/// `events` and `opening` must be the inputs the baseline was projected
/// from; with an empty adjustment list the scenario series is element-wise
/// identical to the baseline and the impact is all zeros.
pub fn simulate(
    baseline: &[CashFlowDataPoint],
    events: &[CashEvent],
    opening: &BTreeMap<Uuid, MoneyCents>,
    horizon: &Horizon,
    adjustments: &[ScenarioAdjustment],
) -> SimulationResult {
    let account = opening.keys().next().copied();
    let mut combined = events.to_vec();
    combined.extend(synthesize_events(adjustments, horizon, account));

    let scenario_points = project(&combined, opening, horizon);
    let impact = ScenarioImpact {
        total_improvement: end_balance(&scenario_points) - end_balance(baseline),
        worst_day_improvement: worst_balance(&scenario_points) - worst_balance(baseline),
        days_above_zero_gained: days_above_zero(&scenario_points) - days_above_zero(baseline),
    };

    SimulationResult {
        scenario_points,
        impact,
    }
}

fn end_balance(points: &[CashFlowDataPoint]) -> MoneyCents {
    points.last().map(|p| p.total).unwrap_or(MoneyCents::ZERO)
}

fn worst_balance(points: &[CashFlowDataPoint]) -> MoneyCents {
    points
        .iter()
        .map(|p| p.total)
        .min()
        .unwrap_or(MoneyCents::ZERO)
}

fn days_above_zero(points: &[CashFlowDataPoint]) -> i64 {
    points.iter().filter(|p| !p.total.is_negative()).count() as i64
}
