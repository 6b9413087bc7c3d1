//! Return calculations wired to a [`QueryService`].

use crate::error::DataResult;
use crate::query_service::QueryService;
use lp_returns_domain::config::ReturnsConfig;
use lp_returns_domain::entities::{PoolState, RawSnapshotEvent};
use lp_returns_domain::history::{HistoricalReturn, HistoryRequest, historical_series};
use lp_returns_domain::lifetime::{LpReturns, lifetime_returns};
use lp_returns_domain::metrics::{Principal, accumulate_principal};
use lp_returns_domain::reconcile::reconcile_pair_snapshots;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Current unix time in seconds.
#[must_use]
pub fn current_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// Computes lifetime and historical returns, fetching inputs on demand.
pub struct ReturnsService<Q: QueryService> {
    query: Arc<Q>,
    config: ReturnsConfig,
}

impl<Q: QueryService> Clone for ReturnsService<Q> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            config: self.config.clone(),
        }
    }
}

impl<Q: QueryService> ReturnsService<Q> {
    /// Creates a service with the default configuration.
    pub fn new(query: Arc<Q>) -> Self {
        Self::with_config(query, ReturnsConfig::default())
    }

    /// Creates a service with a custom configuration.
    pub fn with_config(query: Arc<Q>, config: ReturnsConfig) -> Self {
        Self { query, config }
    }

    /// Returns the underlying query service.
    #[must_use]
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Net principal of `user` on `pair_address`.
    ///
    /// # Errors
    /// Propagates query failures.
    pub async fn principal(&self, user: &str, pair_address: &str) -> DataResult<Principal> {
        let events = self.query.fetch_mints_and_burns(user, pair_address).await?;
        let principal = accumulate_principal(&events.mints, &events.burns, &self.config);

        debug!(
            user = %user,
            pair = %pair_address,
            usd = %principal.usd,
            "Computed principal"
        );
        Ok(principal)
    }

    /// Lifetime returns of `user` on `pool`, from already fetched snapshots.
    ///
    /// # Errors
    /// Propagates the mints/burns query failure.
    pub async fn lp_returns_on_pair(
        &self,
        user: &str,
        pool: &PoolState,
        native_currency_price: Decimal,
        snapshots: &[RawSnapshotEvent],
        now: u64,
    ) -> DataResult<LpReturns> {
        let principal = self.principal(user, &pool.id).await?;
        let returns = lifetime_returns(pool, native_currency_price, snapshots, principal, now);

        info!(
            user = %user,
            pair = %pool.id,
            net = %returns.net.value,
            fees = %returns.fees.sum,
            "Computed lifetime returns"
        );
        Ok(returns)
    }

    /// Fetches the pool, native currency price and snapshots, then computes lifetime returns.
    ///
    /// # Errors
    /// Propagates query failures.
    pub async fn lp_returns_for_user(&self, user: &str, pair_address: &str) -> DataResult<LpReturns> {
        let pool = self.query.fetch_pool(pair_address).await?;
        let native_currency_price = self.query.fetch_native_currency_price().await?;
        let snapshots = self.query.fetch_user_snapshots(user).await?;

        self.lp_returns_on_pair(
            user,
            &pool,
            native_currency_price,
            &snapshots,
            current_timestamp(),
        )
        .await
    }

    /// Day-by-day value and cumulative fees for a pool's snapshot history.
    ///
    /// Snapshots of other pools are ignored. Share values are requested for
    /// every day close; days the indexer cannot resolve fall back to the
    /// pool's current state. The series is empty when no liquidity snapshot
    /// of the pool remains after reconciliation.
    ///
    /// # Errors
    /// Propagates the share value query failure.
    pub async fn historical_pair_returns(
        &self,
        start_timestamp: u64,
        now: u64,
        pool: &PoolState,
        snapshots: &[RawSnapshotEvent],
        native_currency_price: Decimal,
    ) -> DataResult<Vec<HistoricalReturn>> {
        if pool.created_at_timestamp.is_none() {
            debug!(pair = %pool.id, "Pair has no creation time yet");
            return Ok(Vec::new());
        }

        let snapshots = reconcile_pair_snapshots(snapshots, &pool.id);
        let request = HistoryRequest::new(
            start_timestamp,
            now,
            pool,
            &snapshots,
            native_currency_price,
        );

        let closes = request.closing_timestamps();
        if closes.is_empty() {
            return Ok(Vec::new());
        }

        let share_values = self
            .query
            .fetch_share_value_series(&pool.id, &closes)
            .await?;
        debug!(
            pair = %pool.id,
            days = closes.len(),
            observed = share_values.len(),
            "Building historical series"
        );

        Ok(historical_series(&request, &share_values))
    }
}
