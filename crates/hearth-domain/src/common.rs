//! Calendar helpers shared by the ledger and projection models.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies a calendar month (the unit a ledger snapshot covers).
///
/// Only months chrono can represent in full are constructible, so the day bounds
/// are always real dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthKeyRepr", into = "MonthKeyRepr")]
pub struct MonthKey {
    first: NaiveDate,
    last: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthKeyError {
    #[error("month must be between 1 and 12, got {0}")]
    OutOfRange(u32),
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
    #[error("expected YYYY-MM, got `{0}`")]
    Unparseable(String),
}

/// Wire shape: `{"year": 2025, "month": 3}`.
#[derive(Serialize, Deserialize)]
struct MonthKeyRepr {
    year: i32,
    month: u32,
}

impl TryFrom<MonthKeyRepr> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(repr: MonthKeyRepr) -> Result<Self, Self::Error> {
        MonthKey::new(repr.year, repr.month)
    }
}

impl From<MonthKey> for MonthKeyRepr {
    fn from(key: MonthKey) -> Self {
        MonthKeyRepr {
            year: key.year(),
            month: key.month(),
        }
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::OutOfRange(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(MonthKeyError::YearOutOfRange(year))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(MonthKeyError::YearOutOfRange(year))?;
        Ok(Self { first, last })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { first, last }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn day_count(&self) -> u32 {
        self.last.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Iterates every calendar day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        dates_between(self.first, self.last)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Unparseable(trimmed.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| MonthKeyError::Unparseable(trimmed.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| MonthKeyError::Unparseable(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

/// Inclusive date range iterator. Empty when `end < start`.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = (end - start).num_days();
    (0..=span).map(move |offset| start + Duration::days(offset))
}
