//! Day-level series derived from the ledger: the display timeline, the forward
//! projection and the allowance schedule built on top of it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{common::MonthKey, event::TransactionEvent};

/// One calendar day of the ledger feed with its subtotal and running balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLedgerEntry {
    pub date: NaiveDate,
    pub incomes: Decimal,
    pub expenses: Decimal,
    pub total: Decimal,
    pub running_balance: Decimal,
    pub events: Vec<TransactionEvent>,
}

impl DailyLedgerEntry {
    pub fn empty(date: NaiveDate, running_balance: Decimal) -> Self {
        Self {
            date,
            incomes: Decimal::ZERO,
            expenses: Decimal::ZERO,
            total: Decimal::ZERO,
            running_balance,
            events: Vec::new(),
        }
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Events still scheduled (not yet realized) on this day.
    pub fn projected_events(&self) -> impl Iterator<Item = &TransactionEvent> {
        self.events.iter().filter(|event| event.is_projected)
    }
}

/// Aggregated month: one entry per calendar day plus the records that were skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub month: Option<MonthKey>,
    pub opening_balance: Decimal,
    pub entries: Vec<DailyLedgerEntry>,
    pub warnings: Vec<String>,
}

impl Timeline {
    pub fn closing_balance(&self) -> Decimal {
        self.entries
            .last()
            .map(|entry| entry.running_balance)
            .unwrap_or(self.opening_balance)
    }

    pub fn entry(&self, date: NaiveDate) -> Option<&DailyLedgerEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }
}

/// Forward-looking balance for one day of the projection window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyProjection {
    pub day: u32,
    pub date: NaiveDate,
    pub incomes: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub has_transaction: bool,
}

impl DailyProjection {
    pub fn net(&self) -> Decimal {
        self.incomes - self.expenses
    }
}

/// The worst point of the projection relative to the reserve floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub bottleneck_day: NaiveDate,
    pub bottleneck_balance: Decimal,
    pub reserve: Decimal,
    pub slack: Decimal,
    /// Earliest day projected below the reserve, if any.
    pub first_breach_day: Option<NaiveDate>,
    pub first_breach_balance: Option<Decimal>,
}

impl Bottleneck {
    pub fn breaches_reserve(&self) -> bool {
        self.bottleneck_balance < self.reserve
    }
}

/// Safe spending amount for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAllowance {
    pub date: NaiveDate,
    pub weight: Decimal,
    pub allowance: Decimal,
}

/// Allowance for every day of the projection window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceSchedule {
    pub days: Vec<DayAllowance>,
}

impl AllowanceSchedule {
    /// Allowance for the first day of the window ("today"), zero when empty.
    pub fn today(&self) -> Decimal {
        self.days
            .first()
            .map(|day| day.allowance)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn allowance_on(&self, date: NaiveDate) -> Decimal {
        self.days
            .iter()
            .find(|day| day.date == date)
            .map(|day| day.allowance)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.days.iter().map(|day| day.allowance).sum()
    }
}
