//! `hearth_cli`: a thin command layer over [`FinanceDashboard`](crate::FinanceDashboard).

mod commands;
pub mod output;

use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
    str::FromStr,
    sync::Arc,
};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use hearth_config::{Config, ConfigManager};
use hearth_core::time::{Clock, SystemClock};
use hearth_domain::MonthKey;
use hearth_storage_json::JsonLedgerSource;

use crate::{FinanceDashboard, HearthError};

pub use commands::USAGE;

/// Overrides the directory holding `config/` and `ledgers/`.
pub const HOME_ENV: &str = "HEARTH_HOME";

/// Global switches accepted anywhere on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub json: bool,
    pub quiet: bool,
    pub high_contrast: bool,
}

impl Flags {
    fn extract(args: &mut Vec<String>) -> Self {
        let mut flags = Flags::default();
        args.retain(|arg| match arg.as_str() {
            "--json" => {
                flags.json = true;
                false
            }
            "--quiet" | "-q" => {
                flags.quiet = true;
                false
            }
            "--high-contrast" => {
                flags.high_contrast = true;
                false
            }
            _ => true,
        });
        flags
    }
}

/// Where the CLI keeps its files, and what "today" means when no date is given.
#[derive(Clone)]
pub struct CliContext {
    pub home: PathBuf,
    pub config_manager: ConfigManager,
    pub flags: Flags,
    pub clock: Arc<dyn Clock>,
}

impl CliContext {
    pub fn new(home: PathBuf, flags: Flags, clock: Arc<dyn Clock>) -> Result<Self, HearthError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        Ok(Self {
            home,
            config_manager,
            flags,
            clock,
        })
    }

    pub fn ledger_root(&self, config: &Config) -> PathBuf {
        config
            .data_root
            .clone()
            .unwrap_or_else(|| self.home.join("ledgers"))
    }

    pub fn dashboard(&self) -> Result<FinanceDashboard<JsonLedgerSource>, HearthError> {
        let config = self.config_manager.load()?;
        let source = JsonLedgerSource::new(self.ledger_root(&config))?;
        FinanceDashboard::new(source, config)
    }
}

/// Entry point used by the binary.
pub fn run_cli() -> Result<(), HearthError> {
    run(env::args().skip(1).collect())
}

pub fn run(args: Vec<String>) -> Result<(), HearthError> {
    run_with_clock(args, Arc::new(SystemClock))
}

pub fn run_with_clock(mut args: Vec<String>, clock: Arc<dyn Clock>) -> Result<(), HearthError> {
    let flags = Flags::extract(&mut args);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    output::set_preferences(output::OutputPreferences {
        high_contrast_mode: flags.high_contrast,
        quiet_mode: flags.quiet,
    });

    let home = env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::default().resolve_data_root());
    let context = CliContext::new(home, flags, clock)?;
    commands::dispatch(&context, &args)
}

pub(crate) fn parse_month(value: &str) -> Result<MonthKey, HearthError> {
    Ok(value.parse::<MonthKey>()?)
}

/// Explicit date argument, or the clock's date.
pub(crate) fn parse_today(
    value: Option<&String>,
    clock: &dyn Clock,
) -> Result<NaiveDate, HearthError> {
    match value {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| HearthError::Date(raw.clone())),
        None => Ok(clock.today()),
    }
}

pub(crate) fn parse_amount(value: &str) -> Result<Decimal, HearthError> {
    Decimal::from_str(value.trim()).map_err(|_| HearthError::Amount(value.to_string()))
}

#[cfg(test)]
mod tests {
    use hearth_core::time::FixedClock;

    use super::*;

    #[test]
    fn flags_are_removed_from_positional_args() {
        let mut args: Vec<String> = ["health", "--json", "home", "-q", "2025-03"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let flags = Flags::extract(&mut args);
        assert!(flags.json);
        assert!(flags.quiet);
        assert!(!flags.high_contrast);
        assert_eq!(args, vec!["health", "home", "2025-03"]);
    }

    #[test]
    fn missing_date_falls_back_to_the_clock() {
        let pinned = NaiveDate::from_ymd_opt(2025, 3, 22).unwrap();
        let clock = FixedClock(pinned);
        assert_eq!(parse_today(None, &clock).unwrap(), pinned);
        assert_eq!(
            parse_today(Some(&"2025-03-01".to_string()), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn argument_parsers_reject_garbage() {
        assert!(matches!(parse_month("2025-13"), Err(HearthError::Month(_))));
        assert!(matches!(
            parse_today(Some(&"31/03/2025".to_string()), &SystemClock),
            Err(HearthError::Date(_))
        ));
        assert!(matches!(parse_amount("ten"), Err(HearthError::Amount(_))));
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
    }
}
