//! Error taxonomy shared by the distribution, yield and I/O layers.

use std::fmt;

use thiserror::Error;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"distribution.path"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Every way an AEP computation can fail.
///
/// All variants are fatal to the current computation; nothing is retried.
#[derive(Debug, Error)]
pub enum AepError {
    /// Ambiguous or missing provisioning, unknown labels, bad scenario files.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// Malformed histogram or power-curve input.
    #[error("validation error: {0}")]
    Validation(String),
    /// Numeric failure, e.g. a reference curve with zero yield.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl AepError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration(ConfigError::new(field, message))
    }
}
