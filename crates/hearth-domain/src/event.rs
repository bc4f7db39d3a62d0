//! Ledger events as supplied by the ledger source.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of a ledger line.
pub enum EventKind {
    Income,
    Expense,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Income => "income",
            EventKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// One realized or scheduled income/expense record.
///
/// `amount` is a magnitude; `kind` decides whether it raises or lowers the balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_projected: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default = "TransactionEvent::generated_source_id")]
    pub source_id: String,
}

impl TransactionEvent {
    pub fn new(date: NaiveDate, kind: EventKind, amount: Decimal) -> Self {
        Self {
            date,
            kind,
            amount,
            category: String::new(),
            is_projected: false,
            is_recurring: false,
            source_id: Self::generated_source_id(),
        }
    }

    pub fn income(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(date, EventKind::Income, amount)
    }

    pub fn expense(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(date, EventKind::Expense, amount)
    }

    pub fn projected(mut self) -> Self {
        self.is_projected = true;
        self
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EventKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == EventKind::Income
    }

    pub fn generated_source_id() -> String {
        Uuid::new_v4().to_string()
    }
}
