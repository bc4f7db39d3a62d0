//! Finance dashboard: the view layer's single entry point into the engine.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use hearth_config::Config;
use hearth_core::{
    ChartService, FinancialHealthRequest, FinancialHealthService, LedgerSnapshot, LedgerSource,
    TimelineService,
};
use hearth_domain::{ChartSeries, FinancialHealthResult, MonthKey, Timeline};

use crate::{cache::CacheKey, HealthCache, HearthError};

/// Loads ledgers from `S`, applies household settings and memoizes results.
pub struct FinanceDashboard<S: LedgerSource> {
    source: S,
    config: Config,
    cache: HealthCache,
}

impl<S: LedgerSource> FinanceDashboard<S> {
    pub fn new(source: S, config: Config) -> Result<Self, HearthError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            cache: HealthCache::new(),
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &HealthCache {
        &self.cache
    }

    /// Swaps the household settings. Cached results computed under the old ones are dropped.
    pub fn set_config(&mut self, config: Config) -> Result<(), HearthError> {
        config.validate()?;
        self.config = config;
        self.cache.clear();
        Ok(())
    }

    /// Health summary for one household month as of `today`.
    pub fn health(
        &self,
        household: &str,
        month: MonthKey,
        today: NaiveDate,
    ) -> Result<Arc<FinancialHealthResult>, HearthError> {
        let snapshot = self.source.load_month(household, month)?;
        let request = self.request(&snapshot, today);
        let key = CacheKey::for_request(household, &request, &snapshot.warnings);
        let result = self.cache.get_or_compute(key, || {
            let mut result = FinancialHealthService::compute(&request)?;
            if !snapshot.warnings.is_empty() {
                let mut warnings = snapshot.warnings.clone();
                warnings.append(&mut result.warnings);
                result.warnings = warnings;
            }
            Ok(result)
        })?;
        info!(household, month = %month, status = %result.status, "dashboard health ready");
        Ok(result)
    }

    /// Day-by-day ledger view for the month, including source decode warnings.
    pub fn timeline(&self, household: &str, month: MonthKey) -> Result<Timeline, HearthError> {
        let snapshot = self.source.load_month(household, month)?;
        let mut timeline =
            TimelineService::aggregate_month(&snapshot.events, snapshot.opening_balance, month);
        if !snapshot.warnings.is_empty() {
            let mut warnings = snapshot.warnings;
            warnings.append(&mut timeline.warnings);
            timeline.warnings = warnings;
        }
        Ok(timeline)
    }

    pub fn chart(
        &self,
        household: &str,
        month: MonthKey,
        today: NaiveDate,
    ) -> Result<ChartSeries, HearthError> {
        let result = self.health(household, month, today)?;
        Ok(ChartService::build(&result))
    }

    /// Called by whatever mutates the ledger so the next read recomputes.
    pub fn record_ledger_change(&self, household: &str, month: MonthKey) -> usize {
        self.cache.invalidate(household, month)
    }

    fn request(&self, snapshot: &LedgerSnapshot, today: NaiveDate) -> FinancialHealthRequest {
        FinancialHealthRequest::from_snapshot(snapshot, today)
            .with_reserve(self.config.reserve, self.config.reference_income)
            .with_weekend_weight(self.config.weekend_weight)
            .with_thresholds(self.config.thresholds)
    }
}
