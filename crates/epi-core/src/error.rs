//! Engine error type.
//!
//! Sub-crates define their own error enums and wrap `EpiError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    /// A configuration field is out of range or malformed.  Raised when a
    /// policy reads the field, not when it is assigned.
    #[error("configuration error: {field}: {reason}")]
    Config {
        field:  &'static str,
        reason: String,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("parse error: {0}")]
    Parse(String),
}

impl EpiError {
    /// Shorthand for building a [`EpiError::Config`].
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        EpiError::Config { field, reason: reason.into() }
    }
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;
