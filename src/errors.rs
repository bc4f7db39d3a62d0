use hearth_config::ConfigError;
use hearth_core::CoreError;
use hearth_domain::MonthKeyError;
use thiserror::Error;

/// Failures surfaced by the dashboard and the CLI.
#[derive(Debug, Error)]
pub enum HearthError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid month: {0}")]
    Month(#[from] MonthKeyError),
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    Date(String),
    #[error("Invalid amount `{0}`")]
    Amount(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}
