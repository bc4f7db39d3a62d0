//! The ledger boundary: what the engine reads and how bad records are screened out.

use rust_decimal::Decimal;

use hearth_domain::{MonthKey, TransactionEvent};

use crate::CoreError;

/// Read-only snapshot of one household month, as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub household: String,
    pub month: MonthKey,
    pub opening_balance: Decimal,
    /// Realized balance as of now; distinct from the opening balance.
    pub current_balance: Decimal,
    pub events: Vec<TransactionEvent>,
    /// Records the source could not decode.
    pub warnings: Vec<String>,
}

impl LedgerSnapshot {
    pub fn empty(household: impl Into<String>, month: MonthKey) -> Self {
        Self {
            household: household.into(),
            month,
            opening_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Abstraction over whatever persists the household ledger.
pub trait LedgerSource: Send + Sync {
    fn load_month(&self, household: &str, month: MonthKey) -> Result<LedgerSnapshot, CoreError>;
    fn list_months(&self, household: &str) -> Result<Vec<MonthKey>, CoreError>;
}

/// Events that passed screening plus a warning per dropped record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenedEvents {
    pub valid: Vec<TransactionEvent>,
    pub warnings: Vec<String>,
}

/// Drops records that cannot be used (negative magnitudes), keeping ledger order.
pub fn screen_events(events: &[TransactionEvent]) -> ScreenedEvents {
    let mut screened = ScreenedEvents::default();
    for event in events {
        if event.amount < Decimal::ZERO {
            let message = format!(
                "dropped {} {} on {}: negative amount {}",
                event.kind, event.source_id, event.date, event.amount
            );
            tracing::warn!("{message}");
            screened.warnings.push(message);
            continue;
        }
        screened.valid.push(event.clone());
    }
    screened
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn negative_amounts_are_dropped_with_warning() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let events = vec![
            TransactionEvent::expense(date, Decimal::from(20)).with_source_id("ok"),
            TransactionEvent::expense(date, Decimal::from(-5)).with_source_id("bad"),
        ];
        let screened = screen_events(&events);
        assert_eq!(screened.valid.len(), 1);
        assert_eq!(screened.valid[0].source_id, "ok");
        assert_eq!(screened.warnings.len(), 1);
        assert!(screened.warnings[0].contains("bad"));
    }
}
