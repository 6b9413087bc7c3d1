//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_returns_domain::prelude::*;
//! ```

// Configuration
pub use crate::config::{PRICE_DISCOVERY_START_TIMESTAMP, PriceOverrides, ReturnsConfig};

// Entities
pub use crate::entities::{
    MiningPositionSnapshot, MintBurnEvent, MintsAndBurns, PoolState, PoolToken, PositionSnapshot,
    RawSnapshotEvent, ShareValue,
};

// Errors
pub use crate::error::{DomainError, DomainResult};

// History
pub use crate::history::{HistoricalReturn, HistoryRequest, historical_series};

// Lifetime
pub use crate::lifetime::{FeeTotal, LpReturns, ReturnTotal, lifetime_returns};

// Metrics
pub use crate::metrics::{Principal, ReturnMetrics, accumulate_principal, window_returns};

// Reconciliation
pub use crate::reconcile::{reconcile_pair_snapshots, reconcile_snapshots};

// Time
pub use crate::time::{SECONDS_PER_DAY, day_index};
