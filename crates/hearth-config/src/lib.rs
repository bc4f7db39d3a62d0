//! hearth-config
//!
//! Household finance settings (reserve policy, weekend weight, thresholds) plus
//! disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
