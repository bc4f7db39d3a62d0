mod common;

use std::{fs, sync::Arc};

use common::{day, march, seed_march, setup_home};
use hearth::{FinanceDashboard, HearthError};
use hearth_config::{Config, ConfigError};
use hearth_core::LedgerSource;
use hearth_domain::{HealthStatus, PolicyError, ReservePolicy, TransactionEvent};
use rust_decimal::Decimal;

fn config_with_reserve(reserve: i64) -> Config {
    Config {
        reserve: ReservePolicy::fixed(Decimal::from(reserve)),
        ..Config::default()
    }
}

#[test]
fn dashboard_reports_even_split_for_quiet_month() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let dashboard = FinanceDashboard::new(source, config_with_reserve(200)).expect("dashboard");

    let result = dashboard
        .health("home", march(), day(2025, 3, 22))
        .expect("health");

    assert_eq!(result.daily_budget, Decimal::from(80));
    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(result.daily_projections.len(), 10);
}

#[test]
fn repeated_reads_share_the_cached_result() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let dashboard = FinanceDashboard::new(source, config_with_reserve(200)).expect("dashboard");

    let first = dashboard.health("home", march(), day(2025, 3, 22)).unwrap();
    let second = dashboard.health("home", march(), day(2025, 3, 22)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(dashboard.cache().len(), 1);

    // a different `today` is a different input set
    dashboard.health("home", march(), day(2025, 3, 23)).unwrap();
    assert_eq!(dashboard.cache().len(), 2);

    assert_eq!(dashboard.record_ledger_change("home", march()), 2);
    assert!(dashboard.cache().is_empty());
}

#[test]
fn ledger_edits_are_picked_up_after_change() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let dashboard = FinanceDashboard::new(source, config_with_reserve(0)).expect("dashboard");
    let today = day(2025, 3, 10);

    let before = dashboard.health("home", march(), today).unwrap();
    assert_eq!(before.status, HealthStatus::Healthy);

    let mut snapshot = dashboard.source().load_month("home", march()).unwrap();
    snapshot
        .events
        .push(TransactionEvent::expense(day(2025, 3, 13), Decimal::from(1100)).projected());
    dashboard.source().save_month(&snapshot).unwrap();
    dashboard.record_ledger_change("home", march());

    let after = dashboard.health("home", march(), today).unwrap();
    assert_eq!(after.status, HealthStatus::Danger);
    assert_eq!(after.daily_budget, Decimal::ZERO);
}

#[test]
fn source_warnings_reach_the_result() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let path = source.snapshot_path("home", march());
    fs::write(
        &path,
        r#"{
            "openingBalance": "1000",
            "currentBalance": "1000",
            "events": [
                {"date": "2025-03-20", "type": "expense", "amount": "50", "isProjected": true, "sourceId": "ok"},
                {"date": "2025-03-21", "type": "transfer", "amount": "10", "sourceId": "bad"}
            ]
        }"#,
    )
    .unwrap();
    let dashboard = FinanceDashboard::new(source, Config::default()).expect("dashboard");

    let result = dashboard.health("home", march(), day(2025, 3, 15)).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.flexible_commitments, Decimal::from(50));

    let timeline = dashboard.timeline("home", march()).unwrap();
    assert_eq!(timeline.warnings.len(), 1);
    assert_eq!(timeline.closing_balance(), Decimal::from(950));
}

#[test]
fn chart_tracks_reserve_floor_and_cumulative_budget() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let dashboard = FinanceDashboard::new(source, config_with_reserve(200)).expect("dashboard");

    let chart = dashboard.chart("home", march(), day(2025, 3, 22)).unwrap();
    assert_eq!(chart.balance.len(), 10);
    assert!(chart
        .balance
        .iter()
        .all(|point| point.reserve_floor == Decimal::from(200)));
    let last = chart.potential_budget.last().expect("budget point");
    assert_eq!(last.cumulative_allowance, Decimal::from(800));
}

#[test]
fn invalid_settings_are_rejected() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let config = Config {
        reserve: ReservePolicy::percentage(Decimal::from(150)),
        ..Config::default()
    };

    let err = FinanceDashboard::new(source, config).err().expect("rejected");
    assert!(matches!(
        err,
        HearthError::Config(ConfigError::Invalid(PolicyError::PercentageOutOfRange(_)))
    ));
}

#[test]
fn settings_change_drops_cached_results() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let mut dashboard =
        FinanceDashboard::new(source, config_with_reserve(200)).expect("dashboard");
    dashboard.health("home", march(), day(2025, 3, 22)).unwrap();

    dashboard.set_config(config_with_reserve(500)).unwrap();
    assert!(dashboard.cache().is_empty());
    let result = dashboard.health("home", march(), day(2025, 3, 22)).unwrap();
    assert_eq!(result.daily_budget, Decimal::from(50));
}

#[test]
fn unknown_household_is_zeroed() {
    let home = setup_home();
    let source = seed_march(&home, "home", 1000, Vec::new());
    let dashboard = FinanceDashboard::new(source, Config::default()).expect("dashboard");

    let result = dashboard.health("strangers", march(), day(2025, 3, 5)).unwrap();
    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(result.daily_budget, Decimal::ZERO);
    assert!(result.daily_projections.is_empty());
}
