//! Custom error types for cashplan
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for cashplan operations
#[derive(Error, Debug)]
pub enum PlanError {
    /// Installment count outside the supported range
    #[error("Installment count must be between 1 and {max}, got {count}")]
    InvalidInstallmentCount { count: u32, max: u32 },

    /// Amount that must be positive was not
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Money),

    /// Validation errors for caller-supplied data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Allocation attempted on a goal that is not active
    #[error("Goal '{0}' is not active")]
    GoalNotActive(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PlanError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PlanError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for PlanError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for cashplan operations
pub type PlanResult<T> = Result<T, PlanError>;
