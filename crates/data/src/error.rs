//! Error types for subgraph access.

use lp_returns_domain::error::DomainError;
use thiserror::Error;

/// Errors raised while fetching or decoding subgraph data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The subgraph answered with GraphQL errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response carried neither data nor errors.
    #[error("Empty GraphQL response")]
    EmptyResponse,

    /// A requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type.
        entity: &'static str,
        /// Requested id.
        id: String,
    },

    /// A record could not be converted into a domain value.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No client is registered for the network.
    #[error("No client registered for network {0}")]
    UnknownNetwork(String),
}

/// Result alias for data operations.
pub type DataResult<T> = Result<T, DataError>;
