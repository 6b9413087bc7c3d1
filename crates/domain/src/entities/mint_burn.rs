use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A mint (deposit) or burn (withdrawal) of pool liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintBurnEvent {
    pub timestamp: u64,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub amount_usd: Decimal,
    pub token0_id: String,
    pub token1_id: String,
}

/// Every mint and burn a user made on one pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintsAndBurns {
    pub mints: Vec<MintBurnEvent>,
    pub burns: Vec<MintBurnEvent>,
}
