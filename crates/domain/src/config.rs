//! Configuration for return attribution.

use serde::{Deserialize, Serialize};

/// Mints and burns timestamped before this instant predate live price
/// oracles, so their reported USD value is unreliable.
pub const PRICE_DISCOVERY_START_TIMESTAMP: u64 = 1_589_747_086;

/// Mainnet USDC.
pub const USDC_ADDRESS: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
/// Mainnet DAI.
pub const DAI_ADDRESS: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

/// Stablecoins assumed pegged at 1 USD when pricing pre-discovery events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOverrides {
    addresses: Vec<String>,
}

impl PriceOverrides {
    /// Creates an allow-list from token addresses. Addresses are compared case-insensitively.
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses
                .into_iter()
                .map(|a| a.into().to_lowercase())
                .collect(),
        }
    }

    /// Returns an empty allow-list.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            addresses: Vec::new(),
        }
    }

    /// Checks whether a token address is an overridden stablecoin.
    #[must_use]
    pub fn contains(&self, token_address: &str) -> bool {
        self.addresses
            .iter()
            .any(|a| a.eq_ignore_ascii_case(token_address))
    }

    /// Returns the configured addresses.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}

impl Default for PriceOverrides {
    fn default() -> Self {
        Self::new([USDC_ADDRESS, DAI_ADDRESS])
    }
}

/// Configuration for the return calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnsConfig {
    /// Stablecoin allow-list used before price discovery.
    pub price_overrides: PriceOverrides,
    /// Cutoff before which the stablecoin override applies.
    pub price_discovery_start_timestamp: u64,
}

impl Default for ReturnsConfig {
    fn default() -> Self {
        Self {
            price_overrides: PriceOverrides::default(),
            price_discovery_start_timestamp: PRICE_DISCOVERY_START_TIMESTAMP,
        }
    }
}

impl ReturnsConfig {
    /// Sets the stablecoin allow-list.
    #[must_use]
    pub fn with_price_overrides(mut self, overrides: PriceOverrides) -> Self {
        self.price_overrides = overrides;
        self
    }

    /// Sets the price discovery cutoff.
    #[must_use]
    pub fn with_price_discovery_start(mut self, timestamp: u64) -> Self {
        self.price_discovery_start_timestamp = timestamp;
        self
    }
}
