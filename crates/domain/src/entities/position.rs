use crate::math::{mul, safe_div};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A provider's liquidity state in one pool at one instant.
///
/// All fields must come from the same block: balance, supply, reserves and
/// prices are combined without further alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub pair_id: String,
    /// Unix seconds.
    pub timestamp: u64,

    pub liquidity_token_balance: Decimal,
    pub liquidity_token_total_supply: Decimal,

    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub reserve_usd: Decimal,

    pub token0_price_usd: Decimal,
    pub token1_price_usd: Decimal,
}

impl PositionSnapshot {
    /// Share of the pool owned by the provider. Zero when the pool has no supply.
    #[must_use]
    pub fn ownership(&self) -> Decimal {
        safe_div(
            self.liquidity_token_balance,
            self.liquidity_token_total_supply,
        )
    }

    /// USD value of the provider's share according to the pool's reported `reserveUSD`.
    #[must_use]
    pub fn value_usd(&self) -> Decimal {
        mul(self.ownership(), self.reserve_usd)
    }

    /// Returns a copy of this snapshot holding a different LP token balance.
    #[must_use]
    pub fn with_balance(&self, liquidity_token_balance: Decimal) -> Self {
        Self {
            liquidity_token_balance,
            ..self.clone()
        }
    }
}

/// Balance-only snapshot emitted when LP tokens move in or out of a mining contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningPositionSnapshot {
    pub pair_id: String,
    pub timestamp: u64,
    pub liquidity_token_balance: Decimal,
}

/// A snapshot as received from either event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawSnapshotEvent {
    Liquidity(PositionSnapshot),
    Mining(MiningPositionSnapshot),
}

impl RawSnapshotEvent {
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        match self {
            RawSnapshotEvent::Liquidity(s) => s.timestamp,
            RawSnapshotEvent::Mining(s) => s.timestamp,
        }
    }

    #[must_use]
    pub fn pair_id(&self) -> &str {
        match self {
            RawSnapshotEvent::Liquidity(s) => &s.pair_id,
            RawSnapshotEvent::Mining(s) => &s.pair_id,
        }
    }
}

impl From<PositionSnapshot> for RawSnapshotEvent {
    fn from(snapshot: PositionSnapshot) -> Self {
        RawSnapshotEvent::Liquidity(snapshot)
    }
}

impl From<MiningPositionSnapshot> for RawSnapshotEvent {
    fn from(snapshot: MiningPositionSnapshot) -> Self {
        RawSnapshotEvent::Mining(snapshot)
    }
}
