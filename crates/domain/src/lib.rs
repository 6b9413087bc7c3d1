//! Liquidity provider return attribution.
//!
//! This crate holds the pure, synchronous core:
//! - Snapshot reconciliation of liquidity and mining snapshot streams
//! - Per-window return attribution (hodl, net, fees, impermanent loss)
//! - Net principal from mints and burns
//! - Day-by-day historical series
//! - Lifetime return summary
//!
//! Nothing here performs I/O; inputs are fetched by `lp-returns-data`.

/// Prelude module for convenient imports.
pub mod prelude;

/// Return attribution configuration.
pub mod config;
/// Pool, position and event entities.
pub mod entities;
/// Boundary conversion errors.
pub mod error;
/// Historical series builder.
pub mod history;
/// Lifetime return aggregator.
pub mod lifetime;
/// Decimal and constant product math.
pub mod math;
/// Window returns and principal.
pub mod metrics;
/// Snapshot reconciler.
pub mod reconcile;
/// Day bucketing.
pub mod time;
