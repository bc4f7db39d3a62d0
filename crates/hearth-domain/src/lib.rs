//! hearth-domain
//!
//! Pure data model for the household finance engine (ledger events, reserve
//! policy, projections, health results). No I/O, no storage. Only data types
//! and small invariant-preserving helpers.

pub mod common;
pub mod event;
pub mod health;
pub mod policy;
pub mod projection;

pub use common::*;
pub use event::*;
pub use health::*;
pub use policy::*;
pub use projection::*;
