#![doc(test(attr(deny(warnings))))]

//! Hearth is the host application around the household finance engine: it wires a
//! ledger source, persisted settings and a result cache into the dashboard views,
//! and ships the `hearth_cli` binary.

pub mod cache;
pub mod cli;
pub mod dashboard;
pub mod errors;
pub mod utils;

pub use cache::{CacheKey, HealthCache};
pub use dashboard::FinanceDashboard;
pub use errors::HearthError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Hearth tracing initialized.");
    });
}
