//! Error types raised while converting external records into domain values.

use thiserror::Error;

/// Errors produced at the boundary where untyped subgraph values become domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A numeric string could not be parsed as a decimal.
    #[error("Invalid decimal for field `{field}`: {value}")]
    InvalidDecimal {
        /// Field name.
        field: &'static str,
        /// Raw value received.
        value: String,
    },

    /// A timestamp could not be parsed as unix seconds.
    #[error("Invalid timestamp for field `{field}`: {value}")]
    InvalidTimestamp {
        /// Field name.
        field: &'static str,
        /// Raw value received.
        value: String,
    },
}

/// Result alias for domain conversions.
pub type DomainResult<T> = Result<T, DomainError>;
