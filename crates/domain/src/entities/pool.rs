use crate::entities::position::PositionSnapshot;
use crate::entities::token::PoolToken;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live state of a constant product pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub id: String,
    pub token0: PoolToken,
    pub token1: PoolToken,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub reserve_usd: Decimal,
    /// Total LP token supply.
    pub total_supply: Decimal,

    /// Unset while the indexer has not populated the pool yet.
    pub created_at_timestamp: Option<u64>,
}

impl PoolState {
    /// Builds a hypothetical position holding `liquidity_token_balance` against the pool's
    /// current reserves and prices.
    #[must_use]
    pub fn synthesize_position(
        &self,
        liquidity_token_balance: Decimal,
        native_currency_price: Decimal,
        timestamp: u64,
    ) -> PositionSnapshot {
        PositionSnapshot {
            pair_id: self.id.clone(),
            timestamp,
            liquidity_token_balance,
            liquidity_token_total_supply: self.total_supply,
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            reserve_usd: self.reserve_usd,
            token0_price_usd: self.token0.price_usd(native_currency_price),
            token1_price_usd: self.token1.price_usd(native_currency_price),
        }
    }
}

/// Pool state observed at a day boundary, used to value a position at day close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareValue {
    pub timestamp: u64,
    pub total_supply: Decimal,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub reserve_usd: Decimal,
    pub token0_price_usd: Decimal,
    pub token1_price_usd: Decimal,
}

impl ShareValue {
    /// Turns the observation into a position holding `liquidity_token_balance`.
    #[must_use]
    pub fn into_position(
        self,
        pair_id: impl Into<String>,
        liquidity_token_balance: Decimal,
    ) -> PositionSnapshot {
        PositionSnapshot {
            pair_id: pair_id.into(),
            timestamp: self.timestamp,
            liquidity_token_balance,
            liquidity_token_total_supply: self.total_supply,
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            reserve_usd: self.reserve_usd,
            token0_price_usd: self.token0_price_usd,
            token1_price_usd: self.token1_price_usd,
        }
    }
}
