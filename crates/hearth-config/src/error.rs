use std::io;

use hearth_domain::PolicyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid setting: {0}")]
    Invalid(#[from] PolicyError),
}
