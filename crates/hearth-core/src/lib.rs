//! hearth-core
//!
//! Financial health and daily budget projection engine.
//! Depends on hearth-domain. No CLI, no terminal I/O, no storage interactions:
//! every service is a stateless function over a ledger snapshot.

pub mod allowance_service;
pub mod autonomy_service;
pub mod bottleneck_service;
pub mod chart_service;
pub mod error;
pub mod financial_health_service;
pub mod format;
pub mod health_service;
pub mod projection_service;
pub mod source;
pub mod time;
pub mod timeline_service;

pub use allowance_service::*;
pub use autonomy_service::*;
pub use bottleneck_service::*;
pub use chart_service::*;
pub use error::CoreError;
pub use financial_health_service::*;
pub use health_service::*;
pub use projection_service::*;
pub use source::*;
pub use timeline_service::*;
