//! Subgraph access for liquidity provider returns.
//!
//! This crate connects the pure calculations in `lp-returns-domain` to the
//! exchange's indexer:
//! - GraphQL client for the exchange and blocks subgraphs
//! - Typed records parsed from subgraph responses
//! - Per-network client registry
//! - `QueryService` boundary and the `ReturnsService` orchestrator

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Network definitions and client registry.
pub mod network;
/// Query boundary.
pub mod query_service;
/// Subgraph response records.
pub mod records;
/// Return calculations wired to a query service.
pub mod service;
/// GraphQL client and documents.
pub mod subgraph;

pub use error::{DataError, DataResult};
pub use network::{ClientRegistry, Network, NetworkConfig};
pub use query_service::{QueryService, SubgraphQueryService};
pub use service::ReturnsService;
