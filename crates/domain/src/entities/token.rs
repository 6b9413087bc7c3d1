use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One side of a pool as reported by the subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolToken {
    pub id: String,
    pub symbol: String,
    /// Token price denominated in the network's native currency.
    pub derived_native_currency: Decimal,
}

impl PoolToken {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        derived_native_currency: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            derived_native_currency,
        }
    }

    /// USD price given the native currency's USD price.
    #[must_use]
    pub fn price_usd(&self, native_currency_price: Decimal) -> Decimal {
        crate::math::mul(self.derived_native_currency, native_currency_price)
    }
}
