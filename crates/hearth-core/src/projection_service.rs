//! Rolls the realized balance forward from today to month end.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use hearth_domain::{dates_between, DailyLedgerEntry, DailyProjection, MonthKey, Timeline};

use crate::timeline_service::split_totals;

pub struct ProjectionService;

impl ProjectionService {
    /// Projects `[today, month end]` starting from the realized `current_balance`.
    ///
    /// Only scheduled (not yet realized) events move the projection: realized ones are
    /// already part of `current_balance`. Returns an empty window when `today` is past
    /// the month.
    pub fn project(
        timeline: &Timeline,
        current_balance: Decimal,
        today: NaiveDate,
        month: MonthKey,
    ) -> Vec<DailyProjection> {
        let by_date: HashMap<NaiveDate, &DailyLedgerEntry> = timeline
            .entries
            .iter()
            .map(|entry| (entry.date, entry))
            .collect();

        let mut balance = current_balance;
        let mut projections = Vec::new();
        for date in dates_between(today, month.last_day()) {
            let (incomes, expenses, has_transaction) = match by_date.get(&date) {
                Some(entry) => {
                    let (incomes, expenses) = split_totals(entry.projected_events());
                    (incomes, expenses, entry.projected_events().next().is_some())
                }
                None => (Decimal::ZERO, Decimal::ZERO, false),
            };
            balance += incomes - expenses;
            projections.push(DailyProjection {
                day: date.day(),
                date,
                incomes,
                expenses,
                balance,
                has_transaction,
            });
        }

        debug!(
            month = %month,
            %today,
            days = projections.len(),
            "projected balance window"
        );
        projections
    }

    /// Balance at the end of the window, or `current_balance` when the window is empty.
    pub fn end_balance(projections: &[DailyProjection], current_balance: Decimal) -> Decimal {
        projections
            .last()
            .map(|day| day.balance)
            .unwrap_or(current_balance)
    }
}
