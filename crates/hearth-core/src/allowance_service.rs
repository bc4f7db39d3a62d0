//! Reserve-constrained distribution of slack into per-day spending allowances.

use rust_decimal::Decimal;
use tracing::debug;

use hearth_domain::{AllowanceSchedule, Bottleneck, DailyProjection, DayAllowance, DayClassifier};

use crate::bottleneck_service::latest_minimum;

pub struct AllowanceService;

impl AllowanceService {
    /// Spreads the slack over `[today, bottleneck day]` in proportion to day weights.
    ///
    /// Spending exactly the allowance every day lands the bottleneck day on the reserve.
    /// Days after the bottleneck are allocated the same way against the next (latest)
    /// minimum, whose slack is measured from the previous bottleneck balance. Every
    /// allowance is zero when the first slack is not positive.
    pub fn allocate(
        projections: &[DailyProjection],
        bottleneck: &Bottleneck,
        classifier: &dyn DayClassifier,
    ) -> AllowanceSchedule {
        let mut days: Vec<DayAllowance> = projections
            .iter()
            .map(|day| DayAllowance {
                date: day.date,
                weight: classifier.weight(day.date),
                allowance: Decimal::ZERO,
            })
            .collect();

        if bottleneck.slack <= Decimal::ZERO {
            debug!(slack = %bottleneck.slack, "no slack above reserve, allowance floored at zero");
            return AllowanceSchedule { days };
        }

        let mut start = 0;
        let mut floor = bottleneck.reserve;
        while start < projections.len() {
            let Some(offset) = latest_minimum(&projections[start..]) else {
                break;
            };
            let end = start + offset;
            let slack = (projections[end].balance - floor).max(Decimal::ZERO);
            distribute(&mut days[start..=end], slack);
            floor = projections[end].balance;
            start = end + 1;
        }

        debug!(
            slack = %bottleneck.slack,
            today = %days.first().map(|day| day.allowance).unwrap_or_default(),
            "allocated daily allowances"
        );
        AllowanceSchedule { days }
    }
}

fn distribute(segment: &mut [DayAllowance], slack: Decimal) {
    let total_weight: Decimal = segment.iter().map(|day| day.weight).sum();
    if total_weight <= Decimal::ZERO {
        return;
    }
    let Some(base_unit) = slack.checked_div(total_weight) else {
        return;
    };
    for day in segment {
        day.allowance = base_unit * day.weight;
    }
}
