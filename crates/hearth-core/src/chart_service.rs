//! View-model transform for the finance chart.

use chrono::Datelike;
use rust_decimal::Decimal;

use hearth_domain::{BalancePoint, BudgetPoint, ChartSeries, FinancialHealthResult};

pub struct ChartService;

impl ChartService {
    /// Projected balance against the reserve floor, and the allowance that accumulates
    /// when nothing beyond scheduled commitments is spent.
    pub fn build(result: &FinancialHealthResult) -> ChartSeries {
        let balance = result
            .daily_projections
            .iter()
            .map(|day| BalancePoint {
                day: day.day,
                date: day.date,
                projected_balance: day.balance,
                reserve_floor: result.minimum_reserve,
            })
            .collect();

        let mut cumulative = Decimal::ZERO;
        let potential_budget = result
            .allowances
            .days
            .iter()
            .map(|day| {
                cumulative += day.allowance;
                BudgetPoint {
                    day: day.date.day(),
                    date: day.date,
                    allowance: day.allowance,
                    cumulative_allowance: cumulative,
                }
            })
            .collect();

        ChartSeries {
            balance,
            potential_budget,
        }
    }
}
