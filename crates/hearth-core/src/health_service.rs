//! Maps slack, reserve and end-of-month balance onto a tri-state status with alerts.

use rust_decimal::Decimal;
use tracing::debug;

use hearth_domain::{Alert, AutonomyDays, Bottleneck, HealthStatus, HealthThresholds};

use crate::format::display_amount;

/// Figures the classification looks at.
#[derive(Debug, Clone, Copy)]
pub struct HealthInputs<'a> {
    pub bottleneck: Option<&'a Bottleneck>,
    pub reserve: Decimal,
    pub current_balance: Decimal,
    pub reference_income: Decimal,
    pub projected_end_balance: Decimal,
    pub autonomy: AutonomyDays,
    pub thresholds: &'a HealthThresholds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub alerts: Vec<Alert>,
}

pub struct HealthService;

impl HealthService {
    pub fn classify(inputs: &HealthInputs<'_>) -> HealthAssessment {
        // A closed month has nothing left to allocate.
        let Some(bottleneck) = inputs.bottleneck else {
            return HealthAssessment {
                status: HealthStatus::Healthy,
                alerts: Vec::new(),
            };
        };

        let margin = Self::comfortable_margin(inputs);
        let mut alerts = Vec::new();
        let status = if bottleneck.breaches_reserve()
            || inputs.projected_end_balance < Decimal::ZERO
        {
            alerts.push(Self::breach_alert(bottleneck, inputs));
            HealthStatus::Danger
        } else if bottleneck.slack.is_zero() || bottleneck.slack < margin {
            alerts.push(
                Alert::warning(format!(
                    "Only {} above the {} reserve at the low point on {}",
                    display_amount(bottleneck.slack),
                    display_amount(inputs.reserve),
                    bottleneck.bottleneck_day
                ))
                .on(bottleneck.bottleneck_day),
            );
            HealthStatus::Caution
        } else if inputs.projected_end_balance < margin {
            alerts.push(Alert::warning(format!(
                "Month projected to close at {}, close to zero",
                display_amount(inputs.projected_end_balance)
            )));
            HealthStatus::Caution
        } else {
            HealthStatus::Healthy
        };

        if let AutonomyDays::Days(days) = inputs.autonomy {
            if days < Decimal::from(inputs.thresholds.low_autonomy_days) {
                alerts.push(Alert::info(format!(
                    "At the recent spending pace the balance lasts about {} days",
                    inputs.autonomy.display()
                )));
            }
        }

        debug!(%status, slack = %bottleneck.slack, %margin, alerts = alerts.len(), "classified financial health");
        HealthAssessment { status, alerts }
    }

    /// `caution_margin_ratio × max(current balance, reference income)`, never negative.
    pub fn comfortable_margin(inputs: &HealthInputs<'_>) -> Decimal {
        let basis = inputs
            .current_balance
            .max(inputs.reference_income)
            .max(Decimal::ZERO);
        basis * inputs.thresholds.caution_margin_ratio
    }

    fn breach_alert(bottleneck: &Bottleneck, inputs: &HealthInputs<'_>) -> Alert {
        match (bottleneck.first_breach_day, bottleneck.first_breach_balance) {
            (Some(day), Some(balance)) => Alert::critical(format!(
                "Balance projected to drop to {} on {}, {} below the {} reserve",
                display_amount(balance),
                day,
                display_amount(inputs.reserve - balance),
                display_amount(inputs.reserve)
            ))
            .on(day),
            _ => Alert::critical(format!(
                "Month projected to close at {}",
                display_amount(inputs.projected_end_balance)
            )),
        }
    }
}
