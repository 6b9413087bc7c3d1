//! The query boundary between the return calculations and the subgraph.

use crate::error::{DataError, DataResult};
use crate::records::{
    BlockRecord, BundleRecord, HistoricalPairRecord, MintsAndBurnsRecord, PairRecord,
    UserSnapshotsRecord,
};
use crate::subgraph::{SubgraphClient, queries};
use async_trait::async_trait;
use lp_returns_domain::entities::{
    MintBurnEvent, MintsAndBurns, PoolState, RawSnapshotEvent, ShareValue,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

/// Data the return calculations need from the indexer.
///
/// Each call is a single request/response; failures propagate unchanged.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Current state of a pair.
    async fn fetch_pool(&self, pair_address: &str) -> DataResult<PoolState>;

    /// Current USD price of the network's native currency.
    async fn fetch_native_currency_price(&self) -> DataResult<Decimal>;

    /// Liquidity and mining snapshots of a user, across all pairs.
    async fn fetch_user_snapshots(&self, user: &str) -> DataResult<Vec<RawSnapshotEvent>>;

    /// Every mint and burn of `user` on `pair_address`.
    async fn fetch_mints_and_burns(&self, user: &str, pair_address: &str)
    -> DataResult<MintsAndBurns>;

    /// Pool state at each requested timestamp. Timestamps that cannot be
    /// resolved are left out of the result.
    async fn fetch_share_value_series(
        &self,
        pool_id: &str,
        timestamps: &[u64],
    ) -> DataResult<Vec<ShareValue>>;
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    pair: Option<PairRecord>,
}

#[derive(Debug, Deserialize)]
struct BundleResponse {
    bundle: Option<BundleRecord>,
}

/// [`QueryService`] backed by an exchange subgraph and a blocks subgraph.
#[derive(Debug, Clone)]
pub struct SubgraphQueryService {
    exchange: SubgraphClient,
    blocks: SubgraphClient,
}

impl SubgraphQueryService {
    /// Creates a service from its two subgraph clients.
    #[must_use]
    pub fn new(exchange: SubgraphClient, blocks: SubgraphClient) -> Self {
        Self { exchange, blocks }
    }

    /// Resolves each timestamp to the first block within the search window.
    async fn blocks_at(&self, timestamps: &[u64]) -> DataResult<Vec<(u64, u64)>> {
        let query = queries::blocks_at_timestamps(timestamps);
        let response: Map<String, Value> = self.blocks.query(&query, json!({})).await?;

        let mut blocks = Vec::with_capacity(timestamps.len());
        for &ts in timestamps {
            let Some(value) = response.get(&queries::timestamp_alias(ts)) else {
                continue;
            };
            let found: Vec<BlockRecord> = serde_json::from_value(value.clone())?;
            if let Some(block) = found.first() {
                blocks.push((ts, block.number.to_timestamp("number")?));
            }
        }
        Ok(blocks)
    }
}

#[async_trait]
impl QueryService for SubgraphQueryService {
    async fn fetch_pool(&self, pair_address: &str) -> DataResult<PoolState> {
        let response: PairResponse = self
            .exchange
            .query(queries::PAIR, json!({ "id": pair_address.to_lowercase() }))
            .await?;

        let record = response.pair.ok_or_else(|| DataError::NotFound {
            entity: "pair",
            id: pair_address.to_string(),
        })?;
        Ok(PoolState::try_from(record)?)
    }

    async fn fetch_native_currency_price(&self) -> DataResult<Decimal> {
        let response: BundleResponse = self
            .exchange
            .query(queries::NATIVE_CURRENCY_PRICE, json!({}))
            .await?;

        let bundle = response.bundle.ok_or_else(|| DataError::NotFound {
            entity: "bundle",
            id: "1".to_string(),
        })?;
        Ok(bundle.price()?)
    }

    async fn fetch_user_snapshots(&self, user: &str) -> DataResult<Vec<RawSnapshotEvent>> {
        let response: UserSnapshotsRecord = self
            .exchange
            .query(queries::USER_SNAPSHOTS, json!({ "user": user.to_lowercase() }))
            .await?;

        if response.is_truncated(queries::SNAPSHOT_PAGE_SIZE) {
            warn!(
                user = %user,
                liquidity = response.liquidity.len(),
                mining = response.mining.len(),
                limit = queries::SNAPSHOT_PAGE_SIZE,
                "Snapshot history hit the query limit and may be incomplete"
            );
        }

        let events = response.into_events()?;
        debug!(user = %user, snapshots = events.len(), "Fetched user snapshots");
        Ok(events)
    }

    async fn fetch_mints_and_burns(
        &self,
        user: &str,
        pair_address: &str,
    ) -> DataResult<MintsAndBurns> {
        let response: MintsAndBurnsRecord = self
            .exchange
            .query(
                queries::USER_MINTS_BURNS_PER_PAIR,
                json!({ "user": user.to_lowercase(), "pair": pair_address.to_lowercase() }),
            )
            .await?;

        let mints = response
            .mints
            .into_iter()
            .map(MintBurnEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let burns = response
            .burns
            .into_iter()
            .map(MintBurnEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            user = %user,
            pair = %pair_address,
            mints = mints.len(),
            burns = burns.len(),
            "Fetched mints and burns"
        );
        Ok(MintsAndBurns { mints, burns })
    }

    async fn fetch_share_value_series(
        &self,
        pool_id: &str,
        timestamps: &[u64],
    ) -> DataResult<Vec<ShareValue>> {
        if timestamps.is_empty() {
            return Ok(Vec::new());
        }

        let blocks = self.blocks_at(timestamps).await?;
        if blocks.is_empty() {
            return Ok(Vec::new());
        }

        let query = queries::pair_at_blocks(&blocks);
        let response: Map<String, Value> = self
            .exchange
            .query(&query, json!({ "pair": pool_id.to_lowercase() }))
            .await?;

        let mut shares = Vec::with_capacity(blocks.len());
        for (ts, _) in blocks {
            let pair = response
                .get(&queries::timestamp_alias(ts))
                .filter(|v| !v.is_null());
            let bundle = response
                .get(&queries::bundle_alias(ts))
                .filter(|v| !v.is_null());

            // The pair may not exist yet at early blocks.
            let (Some(pair), Some(bundle)) = (pair, bundle) else {
                continue;
            };
            let pair: HistoricalPairRecord = serde_json::from_value(pair.clone())?;
            let bundle: BundleRecord = serde_json::from_value(bundle.clone())?;
            shares.push(pair.into_share_value(ts, bundle.price()?)?);
        }

        info!(
            pool = %pool_id,
            requested = timestamps.len(),
            resolved = shares.len(),
            "Fetched share value series"
        );
        Ok(shares)
    }
}
