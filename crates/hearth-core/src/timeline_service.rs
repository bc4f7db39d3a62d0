//! Day-by-day aggregation of ledger events into a running balance.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use hearth_domain::{DailyLedgerEntry, MonthKey, Timeline, TransactionEvent};

use crate::source::{screen_events, ScreenedEvents};

pub struct TimelineService;

impl TimelineService {
    /// Aggregates events for the month they mostly belong to.
    ///
    /// An empty (or fully invalid) ledger yields a timeline with no entries.
    pub fn aggregate(events: &[TransactionEvent], opening_balance: Decimal) -> Timeline {
        let screened = screen_events(events);
        match Self::infer_month(&screened.valid, None) {
            Some(month) => Self::bucket(screened, opening_balance, month),
            None => Timeline {
                month: None,
                opening_balance,
                entries: Vec::new(),
                warnings: screened.warnings,
            },
        }
    }

    /// Aggregates events into one entry per calendar day of `month`.
    ///
    /// Events dated outside the month are skipped and reported as warnings.
    pub fn aggregate_month(
        events: &[TransactionEvent],
        opening_balance: Decimal,
        month: MonthKey,
    ) -> Timeline {
        Self::bucket(screen_events(events), opening_balance, month)
    }

    fn bucket(screened: ScreenedEvents, opening_balance: Decimal, month: MonthKey) -> Timeline {
        let mut warnings = screened.warnings;
        let mut buckets: BTreeMap<NaiveDate, Vec<TransactionEvent>> = BTreeMap::new();
        for event in screened.valid {
            if !month.contains(event.date) {
                let message = format!(
                    "ignored {} {} dated {}: outside {}",
                    event.kind, event.source_id, event.date, month
                );
                warn!("{message}");
                warnings.push(message);
                continue;
            }
            buckets.entry(event.date).or_default().push(event);
        }

        let mut running_balance = opening_balance;
        let mut entries = Vec::with_capacity(month.day_count() as usize);
        for date in month.days() {
            let Some(events) = buckets.remove(&date) else {
                entries.push(DailyLedgerEntry::empty(date, running_balance));
                continue;
            };
            let (incomes, expenses) = split_totals(events.iter());
            let total = incomes - expenses;
            running_balance += total;
            entries.push(DailyLedgerEntry {
                date,
                incomes,
                expenses,
                total,
                running_balance,
                events,
            });
        }

        debug!(
            month = %month,
            days = entries.len(),
            skipped = warnings.len(),
            "aggregated ledger timeline"
        );
        Timeline {
            month: Some(month),
            opening_balance,
            entries,
            warnings,
        }
    }

    /// The month a ledger covers.
    ///
    /// Ledgers start in their own month and may run into later months for scheduled
    /// commitments, so this is the earliest month holding an event. When `today` is
    /// given and its month lies within the months the events span, that month wins.
    pub fn infer_month(
        events: &[TransactionEvent],
        today: Option<NaiveDate>,
    ) -> Option<MonthKey> {
        let earliest = MonthKey::of(events.iter().map(|event| event.date).min()?);
        let latest = MonthKey::of(events.iter().map(|event| event.date).max()?);
        match today.map(MonthKey::of) {
            Some(current) if current >= earliest && current <= latest => Some(current),
            _ => Some(earliest),
        }
    }
}

/// Sums incomes and expenses separately (both as magnitudes).
pub(crate) fn split_totals<'a>(
    events: impl Iterator<Item = &'a TransactionEvent>,
) -> (Decimal, Decimal) {
    events.fold((Decimal::ZERO, Decimal::ZERO), |(incomes, expenses), event| {
        if event.is_income() {
            (incomes + event.amount, expenses)
        } else {
            (incomes, expenses + event.amount)
        }
    })
}

/// Per-day ledger view: one entry per calendar day with subtotal and running balance.
pub fn compute_timeline(
    events: &[TransactionEvent],
    opening_balance: Decimal,
) -> Vec<DailyLedgerEntry> {
    TimelineService::aggregate(events, opening_balance).entries
}

/// Same as [`compute_timeline`] for an explicitly chosen month.
pub fn compute_timeline_for_month(
    events: &[TransactionEvent],
    opening_balance: Decimal,
    month: MonthKey,
) -> Vec<DailyLedgerEntry> {
    TimelineService::aggregate_month(events, opening_balance, month).entries
}
