//! Entry point chaining timeline, projection, bottleneck, allowance, autonomy and
//! health classification into one [`FinancialHealthResult`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use hearth_domain::{
    AutonomyDays, DayClassifier, FinancialHealthResult, HealthThresholds, MonthKey, PolicyError,
    ReservePolicy, Timeline, TransactionEvent, WeekendWeight,
};

use crate::{
    allowance_service::AllowanceService,
    autonomy_service::AutonomyService,
    bottleneck_service::BottleneckService,
    format::round_currency,
    health_service::{HealthInputs, HealthService},
    projection_service::ProjectionService,
    source::{screen_events, LedgerSnapshot},
    timeline_service::TimelineService,
    CoreError,
};

/// Every input of a health computation. Identical requests give identical results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FinancialHealthRequest {
    pub events: Vec<TransactionEvent>,
    pub opening_balance: Decimal,
    pub current_balance: Decimal,
    pub today: NaiveDate,
    pub reserve_policy: ReservePolicy,
    pub weekend_weight: Decimal,
    pub reference_income: Decimal,
    /// Target month; inferred from the events (or `today`) when absent.
    pub month: Option<MonthKey>,
    pub thresholds: HealthThresholds,
}

impl FinancialHealthRequest {
    pub fn new(
        events: Vec<TransactionEvent>,
        opening_balance: Decimal,
        current_balance: Decimal,
        today: NaiveDate,
    ) -> Self {
        Self {
            events,
            opening_balance,
            current_balance,
            today,
            reserve_policy: ReservePolicy::default(),
            weekend_weight: Decimal::ONE,
            reference_income: Decimal::ZERO,
            month: None,
            thresholds: HealthThresholds::default(),
        }
    }

    pub fn from_snapshot(snapshot: &LedgerSnapshot, today: NaiveDate) -> Self {
        let mut request = Self::new(
            snapshot.events.clone(),
            snapshot.opening_balance,
            snapshot.current_balance,
            today,
        );
        request.month = Some(snapshot.month);
        request
    }

    pub fn with_reserve(mut self, policy: ReservePolicy, reference_income: Decimal) -> Self {
        self.reserve_policy = policy;
        self.reference_income = reference_income;
        self
    }

    pub fn with_weekend_weight(mut self, weight: Decimal) -> Self {
        self.weekend_weight = weight;
        self
    }

    pub fn with_month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_thresholds(mut self, thresholds: HealthThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn is_empty_ledger(&self) -> bool {
        self.events.is_empty()
            && self.opening_balance.is_zero()
            && self.current_balance.is_zero()
    }

    /// The month the computation covers.
    pub fn target_month(&self) -> MonthKey {
        self.month
            .or_else(|| {
                TimelineService::infer_month(&screen_events(&self.events).valid, Some(self.today))
            })
            .unwrap_or_else(|| MonthKey::of(self.today))
    }
}

pub struct FinancialHealthService;

impl FinancialHealthService {
    /// Runs the pipeline with weekend weighting.
    pub fn compute(request: &FinancialHealthRequest) -> Result<FinancialHealthResult, CoreError> {
        let weight = WeekendWeight::new(request.weekend_weight)?;
        Self::compute_with_classifier(request, &weight)
    }

    /// Runs the pipeline with a caller-supplied day weighting.
    pub fn compute_with_classifier(
        request: &FinancialHealthRequest,
        classifier: &dyn DayClassifier,
    ) -> Result<FinancialHealthResult, CoreError> {
        let reserve =
            BottleneckService::resolve_reserve(&request.reserve_policy, request.reference_income)?;
        if request.reference_income < Decimal::ZERO {
            return Err(PolicyError::NegativeReferenceIncome(request.reference_income).into());
        }
        request.thresholds.validate()?;

        if request.is_empty_ledger() {
            debug!("empty ledger, returning zeroed health result");
            return Ok(FinancialHealthResult::zeroed());
        }

        let month = request.target_month();
        let timeline =
            TimelineService::aggregate_month(&request.events, request.opening_balance, month);
        let projections =
            ProjectionService::project(&timeline, request.current_balance, request.today, month);
        let projected_end_balance =
            ProjectionService::end_balance(&projections, request.current_balance);
        let bottleneck = BottleneckService::analyze(&projections, reserve);
        let allowances = bottleneck
            .as_ref()
            .map(|low| AllowanceService::allocate(&projections, low, classifier))
            .unwrap_or_default();
        let autonomy =
            AutonomyService::estimate(&request.events, request.current_balance, request.today);
        let (future_commitments, flexible_commitments) =
            commitments(&timeline, request.today, month);

        let assessment = HealthService::classify(&HealthInputs {
            bottleneck: bottleneck.as_ref(),
            reserve,
            current_balance: request.current_balance,
            reference_income: request.reference_income,
            projected_end_balance,
            autonomy: autonomy.autonomy_days,
            thresholds: &request.thresholds,
        });

        info!(
            month = %month,
            status = %assessment.status,
            daily_budget = %allowances.today(),
            "computed financial health"
        );

        let mut allowances = allowances;
        for day in &mut allowances.days {
            day.allowance = round_currency(day.allowance);
        }

        Ok(FinancialHealthResult {
            current_balance: request.current_balance,
            minimum_reserve: round_currency(reserve),
            future_commitments,
            flexible_commitments,
            daily_budget: allowances.today().max(Decimal::ZERO),
            autonomy_days: match autonomy.autonomy_days {
                AutonomyDays::Days(days) => AutonomyDays::Days(round_currency(days)),
                AutonomyDays::Indefinite => AutonomyDays::Indefinite,
            },
            status: assessment.status,
            alerts: assessment.alerts,
            projected_end_balance,
            average_daily_variable_spend: round_currency(autonomy.average_daily_variable_spend),
            daily_projections: projections,
            bottleneck,
            allowances,
            warnings: timeline.warnings,
        })
    }
}

/// Scheduled expenses still ahead this month: `(recurring, non-recurring)`.
fn commitments(timeline: &Timeline, today: NaiveDate, month: MonthKey) -> (Decimal, Decimal) {
    timeline
        .entries
        .iter()
        .filter(|entry| entry.date >= today && entry.date <= month.last_day())
        .flat_map(|entry| entry.projected_events())
        .filter(|event| event.is_expense())
        .fold((Decimal::ZERO, Decimal::ZERO), |(fixed, flexible), event| {
            if event.is_recurring {
                (fixed + event.amount, flexible)
            } else {
                (fixed, flexible + event.amount)
            }
        })
}

/// Health computation over a month of ledger events.
///
/// The target month is the month of `today` when it lies within the months the events
/// span, else the earliest month holding an event (the month of `today` when there
/// are none). Fails only on unusable settings.
pub fn compute_financial_health(
    events: &[TransactionEvent],
    opening_balance: Decimal,
    current_balance: Decimal,
    today: NaiveDate,
    reserve_policy: ReservePolicy,
    weekend_weight: Decimal,
    reference_income: Decimal,
) -> Result<FinancialHealthResult, CoreError> {
    let request = FinancialHealthRequest::new(events.to_vec(), opening_balance, current_balance, today)
        .with_reserve(reserve_policy, reference_income)
        .with_weekend_weight(weekend_weight);
    FinancialHealthService::compute(&request)
}
