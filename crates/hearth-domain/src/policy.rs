//! Household-level settings that shape the allowance: reserve floor, day weights
//! and health thresholds.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejections raised when a household setting cannot be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("reserve percentage must be within [0, 100], got {0}")]
    PercentageOutOfRange(Decimal),
    #[error("fixed reserve must not be negative, got {0}")]
    NegativeFixedReserve(Decimal),
    #[error("reference income must not be negative, got {0}")]
    NegativeReferenceIncome(Decimal),
    #[error("weekend weight must be at least 1.0, got {0}")]
    WeekendWeightTooLow(Decimal),
    #[error("caution margin ratio must be within [0, 1], got {0}")]
    CautionMarginOutOfRange(Decimal),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReserveKind {
    #[default]
    Fixed,
    Percentage,
}

impl fmt::Display for ReserveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReserveKind::Fixed => "fixed",
            ReserveKind::Percentage => "percentage",
        };
        f.write_str(label)
    }
}

/// Minimum balance the household wants to keep at every point of the month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct ReservePolicy {
    pub kind: ReserveKind,
    pub value: Decimal,
}

impl ReservePolicy {
    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: ReserveKind::Fixed,
            value,
        }
    }

    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: ReserveKind::Percentage,
            value,
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        match self.kind {
            ReserveKind::Fixed if self.value < Decimal::ZERO => {
                Err(PolicyError::NegativeFixedReserve(self.value))
            }
            ReserveKind::Percentage
                if self.value < Decimal::ZERO || self.value > Decimal::ONE_HUNDRED =>
            {
                Err(PolicyError::PercentageOutOfRange(self.value))
            }
            _ => Ok(()),
        }
    }

    /// Resolves the policy to an absolute amount. Percentages apply to `reference_income`.
    pub fn resolve(&self, reference_income: Decimal) -> Decimal {
        match self.kind {
            ReserveKind::Fixed => self.value,
            ReserveKind::Percentage => self.value / Decimal::ONE_HUNDRED * reference_income,
        }
    }
}

impl fmt::Display for ReservePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReserveKind::Fixed => write!(f, "fixed {}", self.value),
            ReserveKind::Percentage => write!(f, "{}% of reference income", self.value),
        }
    }
}

/// Assigns an allocation weight to a calendar day.
pub trait DayClassifier: Send + Sync {
    fn weight(&self, date: NaiveDate) -> Decimal;
}

/// Weights Saturday and Sunday by a multiplier, weekdays by 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WeekendWeight(Decimal);

impl WeekendWeight {
    pub fn new(value: Decimal) -> Result<Self, PolicyError> {
        if value < Decimal::ONE {
            return Err(PolicyError::WeekendWeightTooLow(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for WeekendWeight {
    fn default() -> Self {
        Self(Decimal::ONE)
    }
}

impl DayClassifier for WeekendWeight {
    fn weight(&self, date: NaiveDate) -> Decimal {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => self.0,
            _ => Decimal::ONE,
        }
    }
}

/// Tunable bands used by the health classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HealthThresholds {
    /// Share of `max(current balance, reference income)` below which slack is "tight".
    #[serde(default = "HealthThresholds::default_caution_margin_ratio")]
    pub caution_margin_ratio: Decimal,
    /// Finite runway shorter than this raises an informational alert.
    #[serde(default = "HealthThresholds::default_low_autonomy_days")]
    pub low_autonomy_days: u32,
}

impl HealthThresholds {
    pub fn default_caution_margin_ratio() -> Decimal {
        Decimal::new(10, 2)
    }

    pub fn default_low_autonomy_days() -> u32 {
        7
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.caution_margin_ratio < Decimal::ZERO || self.caution_margin_ratio > Decimal::ONE {
            return Err(PolicyError::CautionMarginOutOfRange(
                self.caution_margin_ratio,
            ));
        }
        Ok(())
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            caution_margin_ratio: Self::default_caution_margin_ratio(),
            low_autonomy_days: Self::default_low_autonomy_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_reserve_resolves_against_reference_income() {
        let policy = ReservePolicy::percentage(Decimal::from(15));
        assert!(policy.validate().is_ok());
        assert_eq!(policy.resolve(Decimal::from(2000)), Decimal::from(300));
    }

    #[test]
    fn percentage_reserve_outside_range_is_rejected() {
        let policy = ReservePolicy::percentage(Decimal::from(120));
        assert_eq!(
            policy.validate(),
            Err(PolicyError::PercentageOutOfRange(Decimal::from(120)))
        );
        assert!(ReservePolicy::percentage(Decimal::from(-1)).validate().is_err());
        assert!(ReservePolicy::fixed(Decimal::from(-5)).validate().is_err());
    }

    #[test]
    fn weekend_weight_applies_only_to_weekends() {
        let weight = WeekendWeight::new(Decimal::from(2)).unwrap();
        let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(weight.weight(friday), Decimal::ONE);
        assert_eq!(weight.weight(saturday), Decimal::from(2));
        assert_eq!(weight.weight(sunday), Decimal::from(2));
        assert!(WeekendWeight::new(Decimal::new(5, 1)).is_err());
    }
}
