use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use api_types::{
    forecast::SourceFlags,
    ledger::{TransactionRow, TransactionStatus},
    recurring::{FlowKind, Frequency, RecurringRow, TemplateStatus},
    scenario::AdjustmentKind,
};
use engine::{
    CashEvent, EventOrigin, Forecaster, ForecastRequest, Horizon, MetricsConfig, MoneyCents,
    RiskScore, ScenarioAdjustment, SourceRows, parse_day, project, run_forecast, simulate,
};

fn day(s: &str) -> NaiveDate {
    parse_day(s).unwrap()
}

fn horizon(start: &str, end: &str) -> Horizon {
    Horizon::new(day(start), day(end))
}

fn posted(account_id: Uuid, amount: i64, date: &str) -> TransactionRow {
    TransactionRow {
        account_id,
        amount,
        date: date.to_string(),
        status: TransactionStatus::Posted,
    }
}

fn pending(account_id: Uuid, amount: i64, date: &str) -> TransactionRow {
    TransactionRow {
        account_id,
        amount,
        date: date.to_string(),
        status: TransactionStatus::Pending,
    }
}

fn request(account: Uuid, rows: SourceRows, horizon: Horizon) -> ForecastRequest {
    ForecastRequest {
        rows,
        selected_accounts: vec![account],
        horizon,
        flags: SourceFlags::default(),
        today: horizon.start(),
        metrics: MetricsConfig::default(),
    }
}

#[test]
fn series_covers_every_day_exactly_once() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![
            posted(account, 300_000, "2024-01-02"),
            posted(account, -45_000, "2024-02-29"),
            pending(account, -12_000, "2024-03-10"),
        ],
        ..Default::default()
    };
    let forecast = run_forecast(&request(account, rows, horizon("2024-01-01", "2024-03-31")));

    assert_eq!(forecast.points.len(), 91);
    for pair in forecast.points.windows(2) {
        assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
    }
}

#[test]
fn every_day_conserves_the_previous_balance() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![
            posted(account, 500_000, "2024-05-15"),
            posted(account, -80_000, "2024-06-03"),
            posted(account, -80_000, "2024-06-03"),
            pending(account, 150_000, "2024-06-20"),
        ],
        recurring: vec![RecurringRow {
            account_id: account,
            frequency: Frequency::Weekly,
            day_of_month: 1,
            expected_amount: 9_000,
            next_due_date: "2024-06-05".to_string(),
            status: TemplateStatus::Active,
            kind: FlowKind::Despesa,
        }],
        ..Default::default()
    };
    let forecast = run_forecast(&request(account, rows, horizon("2024-06-01", "2024-06-30")));

    for pair in forecast.points.windows(2) {
        let day_sum: MoneyCents = forecast
            .events
            .iter()
            .filter(|e| e.date == pair[1].date)
            .map(|e| e.amount)
            .sum();
        assert_eq!(pair[1].total, pair[0].total + day_sum);
    }
}

#[test]
fn empty_selection_yields_ten_zero_points() {
    let stranger = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![posted(stranger, 100_000, "2024-06-02")],
        ..Default::default()
    };
    let request = ForecastRequest {
        rows,
        selected_accounts: Vec::new(),
        horizon: horizon("2024-06-01", "2024-06-10"),
        flags: SourceFlags::default(),
        today: day("2024-06-01"),
        metrics: MetricsConfig::default(),
    };
    let forecast = run_forecast(&request);

    assert_eq!(forecast.points.len(), 10);
    assert!(forecast.points.iter().all(|p| p.total.is_zero()));
    assert!(forecast.points.iter().all(|p| p.per_account.is_empty()));
}

#[test]
fn degenerate_horizon_turns_everything_off() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![posted(account, 100_000, "2024-06-02")],
        ..Default::default()
    };
    let forecast = run_forecast(&request(account, rows, horizon("2024-06-10", "2024-06-01")));

    assert!(forecast.points.is_empty());
    assert_eq!(forecast.metrics.worst_day_date, None);
    assert_eq!(forecast.metrics.days_below_zero, 0);
}

#[test]
fn recurring_day_31_lands_on_february_29() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        recurring: vec![RecurringRow {
            account_id: account,
            frequency: Frequency::Monthly,
            day_of_month: 31,
            expected_amount: 100_000,
            next_due_date: "2024-01-31".to_string(),
            status: TemplateStatus::Active,
            kind: FlowKind::Despesa,
        }],
        ..Default::default()
    };
    let forecast = run_forecast(&request(account, rows, horizon("2024-02-01", "2024-03-31")));

    let dates: Vec<NaiveDate> = forecast.events.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day("2024-02-29"), day("2024-03-31")]);
}

#[test]
fn never_negative_forecast_is_not_high_risk() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![
            posted(account, 1_000_000, "2024-05-01"),
            posted(account, -200_000, "2024-06-10"),
        ],
        ..Default::default()
    };
    let forecast = run_forecast(&request(account, rows, horizon("2024-06-01", "2024-06-30")));

    assert_eq!(forecast.metrics.days_below_zero, 0);
    assert_ne!(forecast.metrics.risk, RiskScore::High);
}

#[test]
fn expense_reduction_worked_example() {
    // Flat baseline of R$ 1000.00 over a 30-day horizon.
    let account = Uuid::new_v4();
    let opening = BTreeMap::from([(account, MoneyCents::new(100_000))]);
    let span = horizon("2024-06-01", "2024-06-30");
    let baseline = project(&[], &opening, &span);
    assert!(baseline.iter().all(|p| p.total == MoneyCents::new(100_000)));

    let result = simulate(
        &baseline,
        &[],
        &opening,
        &span,
        &[ScenarioAdjustment {
            kind: AdjustmentKind::ExpenseReduction,
            amount: MoneyCents::new(20_000),
            description: "cut subscriptions".to_string(),
        }],
    );

    // June contains exactly one month first, the horizon start.
    assert_eq!(result.scenario_points[0].total, MoneyCents::new(120_000));
    assert_eq!(result.impact.total_improvement, MoneyCents::new(20_000));
    assert_eq!(result.impact.worst_day_improvement, MoneyCents::new(20_000));
    assert_eq!(result.impact.days_above_zero_gained, 0);
}

#[test]
fn scenario_on_empty_adjustments_is_identity() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![
            posted(account, 400_000, "2024-05-01"),
            posted(account, -90_000, "2024-06-12"),
        ],
        ..Default::default()
    };
    let mut forecaster = Forecaster::new();
    let request = request(account, rows, horizon("2024-06-01", "2024-06-30"));
    let baseline = forecaster.forecast(&request);

    let result = forecaster.simulate(&request, &[]);
    assert_eq!(result.scenario_points, baseline.points);
    assert_eq!(result.impact.total_improvement, MoneyCents::ZERO);
    assert_eq!(result.impact.worst_day_improvement, MoneyCents::ZERO);
    assert_eq!(result.impact.days_above_zero_gained, 0);
}

#[test]
fn extra_payment_can_rescue_a_negative_stretch() {
    let account = Uuid::new_v4();
    let span = horizon("2024-06-01", "2024-06-10");
    let opening = BTreeMap::from([(account, MoneyCents::new(10_000))]);
    let events = vec![CashEvent::new(
        day("2024-06-05"),
        account,
        MoneyCents::new(-30_000),
        EventOrigin::Pending,
    )];
    let baseline = project(&events, &opening, &span);
    assert!(baseline.iter().any(|p| p.total.is_negative()));

    // "Extra payment" of income received up front: modeled as the negative
    // kind, so use an income increase instead to offset the dip.
    let result = simulate(
        &baseline,
        &events,
        &opening,
        &span,
        &[ScenarioAdjustment {
            kind: AdjustmentKind::IncomeIncrease,
            amount: MoneyCents::new(50_000),
            description: String::new(),
        }],
    );
    assert!(result.scenario_points.iter().all(|p| !p.total.is_negative()));
    assert_eq!(result.impact.days_above_zero_gained, 6);
}

#[test]
fn provisioned_totals_split_current_liquidity() {
    let account = Uuid::new_v4();
    let rows = SourceRows {
        transactions: vec![
            posted(account, 700_000, "2024-05-02"),
            posted(account, -120_000, "2024-06-10"),
            pending(account, 90_000, "2024-06-25"),
            pending(account, -40_000, "2024-06-28"),
        ],
        ..Default::default()
    };
    let mut request = request(account, rows, horizon("2024-06-01", "2024-06-30"));
    request.today = day("2024-06-15");
    let forecast = run_forecast(&request);

    assert_eq!(forecast.provisioned.completed_balance, MoneyCents::new(580_000));
    assert_eq!(forecast.provisioned.pending_income, MoneyCents::new(90_000));
    assert_eq!(forecast.provisioned.pending_expense, MoneyCents::new(-40_000));
    assert_eq!(forecast.provisioned.provisions_amount, MoneyCents::new(50_000));
}
