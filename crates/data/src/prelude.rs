//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_returns_data::prelude::*;
//! ```

// Errors
pub use crate::error::{DataError, DataResult};

// Networks
pub use crate::network::{ClientRegistry, Network, NetworkConfig};

// Query boundary
pub use crate::query_service::{QueryService, SubgraphQueryService};

// Service
pub use crate::service::{ReturnsService, current_timestamp};

// Subgraph
pub use crate::subgraph::SubgraphClient;
