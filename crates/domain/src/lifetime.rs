//! Lifetime return summary for one provider in one pool.

use crate::entities::{PoolState, PositionSnapshot, RawSnapshotEvent};
use crate::metrics::{Principal, window_returns};
use crate::reconcile::reconcile_pair_snapshots;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A summed USD return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnTotal {
    #[serde(rename = "return")]
    pub value: Decimal,
}

/// A summed fee amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTotal {
    pub sum: Decimal,
}

/// Lifetime returns of a provider on one pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpReturns {
    pub principal: Principal,
    pub net: ReturnTotal,
    pub swapr: ReturnTotal,
    pub fees: FeeTotal,
}

/// Sums window returns over every reconciled snapshot of `pool`, closing the
/// last window on a position synthesized from the pool's current state.
///
/// Returns are summed as USD deltas; nothing is compounded.
///
/// # Arguments
///
/// * `pool` - Current pool state
/// * `native_currency_price` - USD price of the network's native currency
/// * `snapshots` - Raw snapshots of the provider, any pool
/// * `principal` - Net principal from the provider's mints and burns
/// * `now` - Timestamp assigned to the synthesized current position
pub fn lifetime_returns(
    pool: &PoolState,
    native_currency_price: Decimal,
    snapshots: &[RawSnapshotEvent],
    principal: Principal,
    now: u64,
) -> LpReturns {
    let mut positions = reconcile_pair_snapshots(snapshots, &pool.id);
    let current = current_position(pool, native_currency_price, &positions, now);
    positions.push(current);

    let mut returns = LpReturns {
        principal,
        ..LpReturns::default()
    };

    // A lone synthesized position opens no window.
    for window in positions.windows(2) {
        let metrics = window_returns(&window[0], &window[1]);
        returns.net.value += metrics.net_return;
        returns.swapr.value += metrics.swapr_return;
        returns.fees.sum += metrics.fees;
    }

    returns
}

/// The provider's latest balance valued against the pool's current state.
fn current_position(
    pool: &PoolState,
    native_currency_price: Decimal,
    positions: &[PositionSnapshot],
    now: u64,
) -> PositionSnapshot {
    let balance = positions
        .last()
        .map(|p| p.liquidity_token_balance)
        .unwrap_or(Decimal::ZERO);
    pool.synthesize_position(balance, native_currency_price, now)
}
