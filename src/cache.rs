//! Memoized health results, one entry per household month and input set.

use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use hearth_core::{CoreError, FinancialHealthRequest};
use hearth_domain::{FinancialHealthResult, MonthKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub household: String,
    pub year: i32,
    pub month: u32,
    /// Hash over every computation input, so changed inputs never hit a stale entry.
    pub input_hash: u64,
}

impl CacheKey {
    /// Key for `request`; `notes` carries source-side context (e.g. decode warnings)
    /// that ends up in the result.
    pub fn for_request(household: &str, request: &FinancialHealthRequest, notes: &[String]) -> Self {
        let month = request.target_month();
        let mut hasher = DefaultHasher::new();
        request.hash(&mut hasher);
        notes.hash(&mut hasher);
        Self {
            household: household.to_string(),
            year: month.year(),
            month: month.month(),
            input_hash: hasher.finish(),
        }
    }

    fn covers(&self, household: &str, month: MonthKey) -> bool {
        self.household == household
            && self.year == month.year()
            && self.month == month.month()
    }
}

/// Thread-safe cache of computed results.
#[derive(Debug, Default)]
pub struct HealthCache {
    entries: RwLock<HashMap<CacheKey, Arc<FinancialHealthResult>>>,
}

impl HealthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<FinancialHealthResult>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns the cached result for `key`, computing and storing it on a miss.
    ///
    /// The computation runs outside the lock; concurrent misses on the same key may
    /// both compute, and the first stored value wins.
    pub fn get_or_compute<F>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<FinancialHealthResult>, CoreError>
    where
        F: FnOnce() -> Result<FinancialHealthResult, CoreError>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(household = %key.household, year = key.year, month = key.month, "health cache hit");
            return Ok(hit);
        }
        let computed = Arc::new(compute()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(computed)))
    }

    /// Drops every entry for the household month. Returns how many were removed.
    pub fn invalidate(&self, household: &str, month: MonthKey) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key.covers(household, month));
        let removed = before - entries.len();
        debug!(household, month = %month, removed, "invalidated health cache");
        removed
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn request(current: i64) -> FinancialHealthRequest {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        FinancialHealthRequest::new(Vec::new(), Decimal::from(500), Decimal::from(current), today)
            .with_month(MonthKey::new(2025, 3).unwrap())
    }

    #[test]
    fn key_changes_with_inputs() {
        let a = CacheKey::for_request("home", &request(400), &[]);
        let b = CacheKey::for_request("home", &request(401), &[]);
        let c = CacheKey::for_request("home", &request(400), &["skipped".to_string()]);
        assert_eq!(a, CacheKey::for_request("home", &request(400), &[]));
        assert_ne!(a.input_hash, b.input_hash);
        assert_ne!(a.input_hash, c.input_hash);
        assert_eq!((a.year, a.month), (2025, 3));
    }

    #[test]
    fn second_lookup_does_not_recompute() {
        let cache = HealthCache::new();
        let key = CacheKey::for_request("home", &request(400), &[]);
        let mut calls = 0;
        cache
            .get_or_compute(key.clone(), || {
                calls += 1;
                Ok(FinancialHealthResult::zeroed())
            })
            .unwrap();
        cache
            .get_or_compute(key, || {
                calls += 1;
                Ok(FinancialHealthResult::zeroed())
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_only_touches_the_given_month() {
        let cache = HealthCache::new();
        let march = CacheKey::for_request("home", &request(400), &[]);
        let april = CacheKey {
            month: 4,
            ..march.clone()
        };
        for key in [march, april] {
            cache
                .get_or_compute(key, || Ok(FinancialHealthResult::zeroed()))
                .unwrap();
        }

        assert_eq!(cache.invalidate("home", MonthKey::new(2025, 3).unwrap()), 1);
        assert_eq!(cache.invalidate("other", MonthKey::new(2025, 4).unwrap()), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_computation_is_not_cached() {
        let cache = HealthCache::new();
        let key = CacheKey::for_request("home", &request(400), &[]);
        let err = cache.get_or_compute(key, || Err(CoreError::Serde("boom".into())));
        assert!(err.is_err());
        assert!(cache.is_empty());
    }
}
