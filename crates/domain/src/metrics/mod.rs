use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod principal;
pub mod window;

pub use principal::accumulate_principal;
pub use window::window_returns;

/// USD return attribution for one window bounded by two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Value change of the T0 token amounts repriced at T1.
    pub hodl_return: Decimal,
    /// Value change of the position itself.
    pub net_return: Decimal,
    /// Fees plus impermanent loss.
    pub swapr_return: Decimal,
    pub imp_loss: Decimal,
    pub fees: Decimal,
}

/// Net principal a provider has put into a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub usd: Decimal,
    pub amount0: Decimal,
    pub amount1: Decimal,
}
