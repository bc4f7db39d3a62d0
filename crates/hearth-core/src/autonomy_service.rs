//! Trailing variable spend and the cash runway it implies.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use hearth_domain::{AutonomyDays, TransactionEvent};

/// Length of the trailing spend window, today included.
pub const TRAILING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutonomyEstimate {
    pub average_daily_variable_spend: Decimal,
    pub autonomy_days: AutonomyDays,
}

pub struct AutonomyService;

impl AutonomyService {
    /// Averages realized non-recurring expenses over the last seven days and divides the
    /// current balance by that rate. Zero spend yields [`AutonomyDays::Indefinite`].
    pub fn estimate(
        events: &[TransactionEvent],
        current_balance: Decimal,
        today: NaiveDate,
    ) -> AutonomyEstimate {
        let window_start = today - Duration::days(TRAILING_WINDOW_DAYS - 1);
        let spent: Decimal = events
            .iter()
            .filter(|event| {
                event.is_expense()
                    && !event.is_projected
                    && !event.is_recurring
                    && event.amount >= Decimal::ZERO
                    && event.date >= window_start
                    && event.date <= today
            })
            .map(|event| event.amount)
            .sum();
        let average = spent / Decimal::from(TRAILING_WINDOW_DAYS);

        let autonomy_days = if average.is_zero() {
            AutonomyDays::Indefinite
        } else {
            AutonomyDays::Days(current_balance.max(Decimal::ZERO) / average)
        };
        AutonomyEstimate {
            average_daily_variable_spend: average,
            autonomy_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn averages_only_realized_variable_spend_in_window() {
        let events = vec![
            TransactionEvent::expense(date(10), Decimal::from(70)),
            TransactionEvent::expense(date(14), Decimal::from(140)),
            // outside the trailing window
            TransactionEvent::expense(date(3), Decimal::from(500)),
            // recurring and scheduled records are commitments, not variable spend
            TransactionEvent::expense(date(12), Decimal::from(900)).recurring(),
            TransactionEvent::expense(date(15), Decimal::from(300)).projected(),
            TransactionEvent::income(date(11), Decimal::from(1000)),
        ];
        let estimate = AutonomyService::estimate(&events, Decimal::from(600), date(16));
        assert_eq!(estimate.average_daily_variable_spend, Decimal::from(30));
        assert_eq!(estimate.autonomy_days, AutonomyDays::Days(Decimal::from(20)));
    }

    #[test]
    fn zero_spend_is_indefinite() {
        let estimate = AutonomyService::estimate(&[], Decimal::from(600), date(16));
        assert_eq!(estimate.average_daily_variable_spend, Decimal::ZERO);
        assert!(estimate.autonomy_days.is_indefinite());
    }

    #[test]
    fn negative_balance_gives_zero_runway() {
        let events = vec![TransactionEvent::expense(date(16), Decimal::from(7))];
        let estimate = AutonomyService::estimate(&events, Decimal::from(-50), date(16));
        assert_eq!(estimate.autonomy_days, AutonomyDays::Days(Decimal::ZERO));
    }
}
