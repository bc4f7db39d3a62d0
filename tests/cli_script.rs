mod common;

use assert_cmd::Command;
use predicates::str::contains;
use rust_decimal::Decimal;

use common::{day, seed_march, setup_home};
use hearth_domain::{FinancialHealthResult, HealthStatus, TransactionEvent};

fn hearth(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("hearth_cli").unwrap();
    cmd.env("HEARTH_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn health_summary_for_seeded_month() {
    let home = setup_home();
    seed_march(&home, "home", 1000, Vec::new());

    hearth(&home)
        .args(["config", "set-reserve", "fixed", "200"])
        .assert()
        .success()
        .stdout(contains("Saved settings"));

    hearth(&home)
        .args(["health", "home", "2025-03", "2025-03-22"])
        .assert()
        .success()
        .stdout(contains("HEALTHY"))
        .stdout(contains("80.00 USD"))
        .stdout(contains("200.00 USD"));
}

#[test]
fn health_json_reports_danger_and_breach_day() {
    let home = setup_home();
    seed_march(
        &home,
        "home",
        500,
        vec![TransactionEvent::expense(day(2025, 3, 13), Decimal::from(600))
            .projected()
            .with_category("rent")],
    );

    let output = hearth(&home)
        .args(["--json", "health", "home", "2025-03", "2025-03-10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: FinancialHealthResult = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result.status, HealthStatus::Danger);
    assert_eq!(result.daily_budget, Decimal::ZERO);
    assert_eq!(result.alerts.len(), 1);
    assert_eq!(result.alerts[0].date, Some(day(2025, 3, 13)));
}

#[test]
fn timeline_lists_event_days() {
    let home = setup_home();
    seed_march(
        &home,
        "home",
        1000,
        vec![TransactionEvent::expense(day(2025, 3, 4), Decimal::new(1250, 2)).with_category("coffee")],
    );

    hearth(&home)
        .args(["timeline", "home", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-04"))
        .stdout(contains("coffee"))
        .stdout(contains("987.50 USD"));
}

#[test]
fn chart_prints_both_series() {
    let home = setup_home();
    seed_march(&home, "home", 1000, Vec::new());

    hearth(&home)
        .args(["chart", "home", "2025-03", "2025-03-30"])
        .assert()
        .success()
        .stdout(contains("\"balance\""))
        .stdout(contains("\"potentialBudget\""));
}

#[test]
fn out_of_range_reserve_is_refused() {
    let home = setup_home();

    hearth(&home)
        .args(["config", "set-reserve", "percentage", "140"])
        .assert()
        .failure()
        .stderr(contains("Error:"))
        .stderr(contains("percentage"));

    hearth(&home)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(contains("\"kind\": \"fixed\""));
}

#[test]
fn weekend_weight_below_one_is_refused() {
    let home = setup_home();

    hearth(&home)
        .args(["config", "set-weekend-weight", "0.5"])
        .assert()
        .failure()
        .stderr(contains("weekend weight"));
}

#[test]
fn bad_arguments_fail_with_error() {
    let home = setup_home();

    hearth(&home)
        .args(["health", "home", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));

    hearth(&home)
        .args(["timeline", "home", "300000-01"])
        .assert()
        .failure()
        .stderr(contains("outside the supported calendar range"));

    hearth(&home)
        .arg("balance")
        .assert()
        .failure()
        .stderr(contains("unknown command"));
}

#[test]
fn version_prints_build_metadata() {
    let home = setup_home();

    hearth(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("Hearth"))
        .stdout(contains("Commit"));
}
