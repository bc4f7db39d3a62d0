use std::path::PathBuf;

use hearth_domain::{HealthThresholds, PolicyError, ReservePolicy, WeekendWeight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Household-level settings read by the finance engine and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub reserve: ReservePolicy,
    #[serde(default = "Config::default_weekend_weight")]
    pub weekend_weight: Decimal,
    /// Income a percentage reserve is measured against (a fixed household figure).
    #[serde(default)]
    pub reference_income: Decimal,
    #[serde(default)]
    pub thresholds: HealthThresholds,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for ledger snapshots. Defaults to the platform data dir.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            reserve: ReservePolicy::default(),
            weekend_weight: Self::default_weekend_weight(),
            reference_income: Decimal::ZERO,
            thresholds: HealthThresholds::default(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_weekend_weight() -> Decimal {
        Decimal::ONE
    }

    /// Rejects settings the engine cannot use; nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reserve.validate()?;
        WeekendWeight::new(self.weekend_weight)?;
        if self.reference_income < Decimal::ZERO {
            return Err(PolicyError::NegativeReferenceIncome(self.reference_income).into());
        }
        self.thresholds.validate()?;
        Ok(())
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("hearth")
    }
}
