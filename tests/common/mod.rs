#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use hearth_core::LedgerSnapshot;
use hearth_domain::{MonthKey, TransactionEvent};
use hearth_storage_json::JsonLedgerSource;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated hearth home directory for one test.
pub fn setup_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn march() -> MonthKey {
    MonthKey::new(2025, 3).expect("valid month")
}

/// Writes a March 2025 snapshot under `<home>/ledgers` and returns the source.
pub fn seed_march(
    home: &Path,
    household: &str,
    balance: i64,
    events: Vec<TransactionEvent>,
) -> JsonLedgerSource {
    let source = JsonLedgerSource::new(home.join("ledgers")).expect("create json source");
    let mut snapshot = LedgerSnapshot::empty(household, march());
    snapshot.opening_balance = Decimal::from(balance);
    snapshot.current_balance = Decimal::from(balance);
    snapshot.events = events;
    source.save_month(&snapshot).expect("save snapshot");
    source
}
