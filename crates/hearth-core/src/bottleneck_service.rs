//! Worst-future-day detection over the projected balance.

use rust_decimal::Decimal;

use hearth_domain::{Bottleneck, DailyProjection, ReservePolicy};

use crate::CoreError;

pub struct BottleneckService;

impl BottleneckService {
    /// Validates the policy and turns it into an absolute reserve amount.
    pub fn resolve_reserve(
        policy: &ReservePolicy,
        reference_income: Decimal,
    ) -> Result<Decimal, CoreError> {
        policy.validate()?;
        Ok(policy.resolve(reference_income))
    }

    /// Finds the lowest projected balance and the slack above `reserve` at that point.
    ///
    /// Equal minima resolve to the latest day so a flat stretch counts as one long
    /// bottleneck. `None` for an empty window.
    pub fn analyze(projections: &[DailyProjection], reserve: Decimal) -> Option<Bottleneck> {
        let index = latest_minimum(projections)?;
        let low = &projections[index];
        let first_breach = projections.iter().find(|day| day.balance < reserve);
        Some(Bottleneck {
            bottleneck_day: low.date,
            bottleneck_balance: low.balance,
            reserve,
            slack: low.balance - reserve,
            first_breach_day: first_breach.map(|day| day.date),
            first_breach_balance: first_breach.map(|day| day.balance),
        })
    }
}

/// Index of the lowest balance, preferring the latest of equal minima.
pub(crate) fn latest_minimum(projections: &[DailyProjection]) -> Option<usize> {
    let mut found: Option<usize> = None;
    for (index, day) in projections.iter().enumerate() {
        match found {
            Some(current) if projections[current].balance < day.balance => {}
            _ => found = Some(index),
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, NaiveDate};

    use super::*;

    fn window(balances: &[i64]) -> Vec<DailyProjection> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut previous = None;
        balances
            .iter()
            .enumerate()
            .map(|(offset, balance)| {
                let date = start + Duration::days(offset as i64);
                let balance = Decimal::from(*balance);
                let net = previous.map(|prev| balance - prev).unwrap_or(Decimal::ZERO);
                previous = Some(balance);
                DailyProjection {
                    day: date.day(),
                    date,
                    incomes: net.max(Decimal::ZERO),
                    expenses: (-net).max(Decimal::ZERO),
                    balance,
                    has_transaction: !net.is_zero(),
                }
            })
            .collect()
    }

    #[test]
    fn finds_minimum_and_slack() {
        let days = window(&[500, 450, 120, 300, 300]);
        let bottleneck = BottleneckService::analyze(&days, Decimal::from(100)).unwrap();
        assert_eq!(bottleneck.bottleneck_day, days[2].date);
        assert_eq!(bottleneck.slack, Decimal::from(20));
        assert!(!bottleneck.breaches_reserve());
        assert_eq!(bottleneck.first_breach_day, None);
    }

    #[test]
    fn equal_minima_resolve_to_latest_day() {
        let days = window(&[200, 200, 200]);
        let bottleneck = BottleneckService::analyze(&days, Decimal::ZERO).unwrap();
        assert_eq!(bottleneck.bottleneck_day, days[2].date);
    }

    #[test]
    fn reports_first_breach_day() {
        let days = window(&[500, 500, -100, -100]);
        let bottleneck = BottleneckService::analyze(&days, Decimal::ZERO).unwrap();
        assert!(bottleneck.breaches_reserve());
        assert_eq!(bottleneck.slack, Decimal::from(-100));
        assert_eq!(bottleneck.first_breach_day, Some(days[2].date));
        assert_eq!(bottleneck.first_breach_balance, Some(Decimal::from(-100)));
    }

    #[test]
    fn empty_window_has_no_bottleneck() {
        assert!(BottleneckService::analyze(&[], Decimal::ZERO).is_none());
    }

    #[test]
    fn invalid_percentage_reserve_is_a_config_error() {
        let policy = ReservePolicy::percentage(Decimal::from(150));
        let err = BottleneckService::resolve_reserve(&policy, Decimal::from(1000)).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
