//! End-to-end forecast composition and memoization.
//!
//! The pipeline stages are pure functions; this module is the caller-side
//! glue that owns the recomputation policy. A [`Forecaster`] memoizes whole
//! forecasts keyed by a stable hash of the request, so re-invoking with
//! unchanged inputs skips the recompute and any changed input triggers a
//! full one. No incremental update is attempted.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use api_types::forecast::SourceFlags;

use crate::{
    CashEvent, EventOrigin, Horizon, MoneyCents,
    metrics::{CashFlowMetrics, MetricsConfig, compute_metrics},
    normalize::{SourceRows, collect_events},
    projection::{CashFlowDataPoint, project},
    provisioned::{ProvisionedTotals, split_provisioned},
    scenario::{ScenarioAdjustment, SimulationResult, simulate},
};

/// Everything one forecast run needs: the row snapshot plus the parameters
/// the UI layer owns (selection, horizon, flags, reference day, tuning).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForecastRequest {
    pub rows: SourceRows,
    pub selected_accounts: Vec<Uuid>,
    pub horizon: Horizon,
    pub flags: SourceFlags,
    /// Reference day for the completed/provisioned split.
    pub today: NaiveDate,
    pub metrics: MetricsConfig,
}

/// One computed forecast: the daily series, its risk summary, the current
/// liquidity split, and the inputs a scenario re-run needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    pub points: Vec<CashFlowDataPoint>,
    pub metrics: CashFlowMetrics,
    pub provisioned: ProvisionedTotals,
    /// Balance per selected account as of the horizon start.
    pub opening: BTreeMap<Uuid, MoneyCents>,
    /// The normalized event list the series was projected from.
    pub events: Vec<CashEvent>,
}

/// Runs the whole pipeline once: normalize, expand, sweep, derive.
pub fn run_forecast(request: &ForecastRequest) -> Forecast {
    let selected: BTreeSet<Uuid> = request.selected_accounts.iter().copied().collect();
    let events = collect_events(&request.rows, &selected, &request.flags, &request.horizon);

    // Ledger state as of the horizon start: posted events dated before it.
    let mut opening: BTreeMap<Uuid, MoneyCents> = selected
        .iter()
        .map(|id| (*id, MoneyCents::ZERO))
        .collect();
    for event in &events {
        if event.origin == EventOrigin::Posted && event.date < request.horizon.start() {
            if let Some(balance) = opening.get_mut(&event.account_id) {
                *balance += event.amount;
            }
        }
    }

    let points = project(&events, &opening, &request.horizon);
    let metrics = compute_metrics(&points, &request.metrics);
    let provisioned = split_provisioned(&events, request.today);

    Forecast {
        points,
        metrics,
        provisioned,
        opening,
        events,
    }
}

/// Owns the memoized forecasts.
///
/// Not shared across threads; concurrent comparisons (two horizons side by
/// side) each get their own `Forecaster` and cannot interfere.
#[derive(Debug, Default)]
pub struct Forecaster {
    cache: HashMap<u64, Arc<Forecast>>,
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the forecast for `request`, computing it only when no
    /// identical request has been served since the last invalidation.
    pub fn forecast(&mut self, request: &ForecastRequest) -> Arc<Forecast> {
        let key = request_key(request);
        if let Some(cached) = self.cache.get(&key) {
            debug!(key, "forecast cache hit");
            return Arc::clone(cached);
        }
        let forecast = Arc::new(run_forecast(request));
        self.cache.insert(key, Arc::clone(&forecast));
        forecast
    }

    /// Overlays adjustments on the (possibly cached) baseline for `request`.
    pub fn simulate(
        &mut self,
        request: &ForecastRequest,
        adjustments: &[ScenarioAdjustment],
    ) -> SimulationResult {
        let baseline = self.forecast(request);
        simulate(
            &baseline.points,
            &baseline.events,
            &baseline.opening,
            &request.horizon,
            adjustments,
        )
    }

    /// Drops every memoized forecast, e.g. after the underlying rows change
    /// without changing identity.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

fn request_key(request: &ForecastRequest) -> u64 {
    let mut hasher = DefaultHasher::new();
    request.hash(&mut hasher);
    hasher.finish()
}
