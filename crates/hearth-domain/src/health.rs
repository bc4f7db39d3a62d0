//! Health classification output and the view series consumed by charts.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projection::{AllowanceSchedule, Bottleneck, DailyProjection};

/// Runway values at or above this many days are displayed as "N+".
pub const AUTONOMY_DISPLAY_CAP_DAYS: u32 = 90;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Caution,
    Danger,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Caution => "CAUTION",
            HealthStatus::Danger => "DANGER",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
    /// Day the alert refers to, when it concerns a specific point of the projection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Alert {
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Critical, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Info, message)
    }

    fn new(severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Estimated days of runway at the recent variable spending rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AutonomyDays {
    Days(Decimal),
    /// No recent variable spending: the balance is not being drawn down.
    Indefinite,
}

impl AutonomyDays {
    pub fn is_indefinite(&self) -> bool {
        matches!(self, AutonomyDays::Indefinite)
    }

    pub fn days(&self) -> Option<Decimal> {
        match self {
            AutonomyDays::Days(days) => Some(*days),
            AutonomyDays::Indefinite => None,
        }
    }

    /// Whole days, capped for display (`90+`).
    pub fn display(&self) -> String {
        let cap = Decimal::from(AUTONOMY_DISPLAY_CAP_DAYS);
        match self {
            AutonomyDays::Days(days) if *days < cap => days.floor().to_string(),
            _ => format!("{AUTONOMY_DISPLAY_CAP_DAYS}+"),
        }
    }
}

impl Default for AutonomyDays {
    fn default() -> Self {
        AutonomyDays::Days(Decimal::ZERO)
    }
}

impl fmt::Display for AutonomyDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Everything the finance summary cards, timeline and charts read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthResult {
    pub current_balance: Decimal,
    pub minimum_reserve: Decimal,
    pub future_commitments: Decimal,
    pub flexible_commitments: Decimal,
    pub daily_budget: Decimal,
    pub autonomy_days: AutonomyDays,
    pub status: HealthStatus,
    pub alerts: Vec<Alert>,
    pub projected_end_balance: Decimal,
    pub average_daily_variable_spend: Decimal,
    pub daily_projections: Vec<DailyProjection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottleneck: Option<Bottleneck>,
    #[serde(default)]
    pub allowances: AllowanceSchedule,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl FinancialHealthResult {
    /// Result for a household with no ledger data yet.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn alerts_with(&self, severity: AlertSeverity) -> impl Iterator<Item = &Alert> {
        self.alerts
            .iter()
            .filter(move |alert| alert.severity == severity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub day: u32,
    pub date: NaiveDate,
    pub projected_balance: Decimal,
    pub reserve_floor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPoint {
    pub day: u32,
    pub date: NaiveDate,
    pub allowance: Decimal,
    /// Allowance accumulated up to this day if nothing discretionary is spent before it.
    pub cumulative_allowance: Decimal,
}

/// The two display series of the finance chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub balance: Vec<BalancePoint>,
    pub potential_budget: Vec<BudgetPoint>,
}
