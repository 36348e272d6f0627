//! Cash-flow projection and scenario simulation.
//!
//! Turns a snapshot of heterogeneous dated financial events (posted and
//! pending transactions, recurring bills, installment series, savings plans)
//! into one ordered daily balance timeline, derives risk metrics from it,
//! and overlays what-if scenarios diffed against the baseline. Every stage
//! is a pure, synchronous function; the persistence layer fetches rows, the
//! charting layer consumes series, and neither concern lives here.

pub use error::EngineError;
pub use event::{CashEvent, EventOrigin};
pub use expand::{expand_installments, expand_plan, expand_recurring};
pub use forecast::{Forecast, ForecastRequest, Forecaster, run_forecast};
pub use horizon::{Horizon, parse_day};
pub use installments::{InstallmentGroup, InstallmentSource, PlanInstallment};
pub use metrics::{
    CashFlowMetrics, MetricsConfig, RiskScore, TREND_TOLERANCE, TrendDirection, compute_metrics,
};
pub use money::MoneyCents;
pub use normalize::{SourceRows, collect_events};
pub use projection::{CashFlowDataPoint, project};
pub use provisioned::{ProvisionedTotals, split_provisioned};
pub use recurring::{FlowKind, Frequency, RecurringTemplate, TemplateStatus};
pub use scenario::{
    AdjustmentKind, ScenarioAdjustment, ScenarioImpact, SimulationResult, simulate,
    synthesize_events,
};

mod error;
mod event;
mod expand;
mod forecast;
mod horizon;
mod installments;
mod metrics;
mod money;
mod normalize;
mod projection;
mod provisioned;
mod recurring;
mod scenario;

type ResultEngine<T> = Result<T, EngineError>;
