//! Risk metrics derived from a projected series.
//!
//! Every figure here is a pure function of the `CashFlowDataPoint` series
//! alone; nothing depends on the event list that produced it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MoneyCents, projection::CashFlowDataPoint};

/// Relative tolerance below which the first/last window means are considered
/// equal and the trend reports `Flat`.
pub const TREND_TOLERANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

/// Metrics tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Worst-day balance below this floor rates the forecast `Medium` even
    /// when it never goes negative. An explicit configuration value, not a
    /// figure inferred from spending history.
    pub low_balance_floor: MoneyCents,
}

impl Default for MetricsConfig {
    /// Defaults to a floor of R$ 500.00.
    fn default() -> Self {
        Self {
            low_balance_floor: MoneyCents::new(50_000),
        }
    }
}

/// Derived risk summary of one projected series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashFlowMetrics {
    pub worst_day_balance: MoneyCents,
    pub worst_day_date: Option<NaiveDate>,
    pub projected_end_balance: MoneyCents,
    pub days_below_zero: usize,
    /// Arithmetic mean of the daily totals, in cents.
    pub average_balance: f64,
    pub trend: TrendDirection,
    pub risk: RiskScore,
}

impl CashFlowMetrics {
    fn empty() -> Self {
        Self {
            worst_day_balance: MoneyCents::ZERO,
            worst_day_date: None,
            projected_end_balance: MoneyCents::ZERO,
            days_below_zero: 0,
            average_balance: 0.0,
            trend: TrendDirection::Flat,
            risk: RiskScore::Low,
        }
    }
}

/// Computes the full risk summary for a series.
///
/// An empty series (degenerate horizon) yields zeroed metrics rather than an
/// error. Ties on the worst day resolve to the first occurrence.
pub fn compute_metrics(points: &[CashFlowDataPoint], config: &MetricsConfig) -> CashFlowMetrics {
    let Some(last) = points.last() else {
        return CashFlowMetrics::empty();
    };

    let mut worst = points[0].total;
    let mut worst_date = points[0].date;
    let mut below_zero = 0usize;
    let mut sum = 0i64;
    for point in points {
        if point.total < worst {
            worst = point.total;
            worst_date = point.date;
        }
        if point.total.is_negative() {
            below_zero += 1;
        }
        sum += point.total.cents();
    }

    let risk = if below_zero > 0 {
        RiskScore::High
    } else if worst < config.low_balance_floor {
        RiskScore::Medium
    } else {
        RiskScore::Low
    };

    CashFlowMetrics {
        worst_day_balance: worst,
        worst_day_date: Some(worst_date),
        projected_end_balance: last.total,
        days_below_zero: below_zero,
        average_balance: sum as f64 / points.len() as f64,
        trend: trend_direction(points),
        risk,
    }
}

/// Compares the mean of the last 20% of points against the first 20%.
fn trend_direction(points: &[CashFlowDataPoint]) -> TrendDirection {
    let window = points.len().div_ceil(5).max(1);
    let mean = |slice: &[CashFlowDataPoint]| {
        slice.iter().map(|p| p.total.as_f64()).sum::<f64>() / slice.len() as f64
    };
    let early = mean(&points[..window]);
    let late = mean(&points[points.len() - window..]);
    let base = early.abs().max(1.0);
    let shift = (late - early) / base;
    if shift > TREND_TOLERANCE {
        TrendDirection::Up
    } else if shift < -TREND_TOLERANCE {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    }
}
