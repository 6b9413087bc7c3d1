//! Supported networks and the per-network client registry.
//!
//! The registry is built once at startup and passed to whatever needs a
//! query service; there is no global client lookup.

use crate::error::{DataError, DataResult};
use crate::query_service::SubgraphQueryService;
use crate::subgraph::SubgraphClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Base URL of the hosted subgraph service.
pub const DEFAULT_SUBGRAPH_BASE_URL: &str = "https://api.thegraph.com/subgraphs/name/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Networks the exchange is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Xdai,
    ArbitrumOne,
}

impl Network {
    /// All supported networks.
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Xdai, Network::ArbitrumOne];

    /// Exchange subgraph name on the hosted service.
    #[must_use]
    pub fn exchange_subgraph(&self) -> &'static str {
        match self {
            Network::Mainnet => "dxgraphs/swapr-mainnet-v2",
            Network::Xdai => "dxgraphs/swapr-xdai-v2",
            Network::ArbitrumOne => "dxgraphs/swapr-arbitrum-one-v3",
        }
    }

    /// Blocks subgraph name on the hosted service.
    #[must_use]
    pub fn blocks_subgraph(&self) -> &'static str {
        match self {
            Network::Mainnet => "blocklytics/ethereum-blocks",
            Network::Xdai => "1hive/xdai-blocks",
            Network::ArbitrumOne => "dodoex/arbitrum-one-blocks",
        }
    }

    /// Key used in environment variable names.
    #[must_use]
    pub fn env_key(&self) -> &'static str {
        match self {
            Network::Mainnet => "MAINNET",
            Network::Xdai => "XDAI",
            Network::ArbitrumOne => "ARBITRUM_ONE",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Xdai => "xdai",
            Network::ArbitrumOne => "arbitrum-one",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Network {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "mainnet" | "ethereum" => Ok(Network::Mainnet),
            "xdai" | "gnosis" => Ok(Network::Xdai),
            "arbitrum-one" | "arbitrum" => Ok(Network::ArbitrumOne),
            _ => Err(DataError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Endpoints for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: Network,
    /// Exchange subgraph URL.
    pub exchange_url: String,
    /// Blocks subgraph URL.
    pub blocks_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl NetworkConfig {
    /// Hosted-service endpoints under `base_url`.
    #[must_use]
    pub fn hosted(network: Network, base_url: &str) -> Self {
        Self {
            network,
            exchange_url: format!("{base_url}{}", network.exchange_subgraph()),
            blocks_url: format!("{base_url}{}", network.blocks_subgraph()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads endpoints from the environment, falling back to the hosted service.
    ///
    /// * `LP_RETURNS_SUBGRAPH_BASE_URL` - base URL for every network
    /// * `LP_RETURNS_<NETWORK>_SUBGRAPH_URL` - exchange subgraph URL
    /// * `LP_RETURNS_<NETWORK>_BLOCKS_URL` - blocks subgraph URL
    /// * `LP_RETURNS_TIMEOUT_SECS` - request timeout
    #[must_use]
    pub fn from_env(network: Network) -> Self {
        let base_url = env::var("LP_RETURNS_SUBGRAPH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SUBGRAPH_BASE_URL.to_string());
        let mut config = Self::hosted(network, &base_url);

        let key = network.env_key();
        if let Ok(url) = env::var(format!("LP_RETURNS_{key}_SUBGRAPH_URL")) {
            config.exchange_url = url;
        }
        if let Ok(url) = env::var(format!("LP_RETURNS_{key}_BLOCKS_URL")) {
            config.blocks_url = url;
        }
        if let Some(secs) = env::var("LP_RETURNS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::hosted(Network::Mainnet, DEFAULT_SUBGRAPH_BASE_URL)
    }
}

/// One query service per network.
#[derive(Clone)]
pub struct ClientRegistry {
    services: HashMap<Network, Arc<SubgraphQueryService>>,
}

impl ClientRegistry {
    /// Builds clients for the given network configurations.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(configs: impl IntoIterator<Item = NetworkConfig>) -> DataResult<Self> {
        let mut services = HashMap::new();
        for config in configs {
            debug!(
                network = %config.network,
                exchange = %config.exchange_url,
                blocks = %config.blocks_url,
                "Registering subgraph clients"
            );
            let exchange = SubgraphClient::new(&config.exchange_url, config.timeout)?;
            let blocks = SubgraphClient::new(&config.blocks_url, config.timeout)?;
            services.insert(
                config.network,
                Arc::new(SubgraphQueryService::new(exchange, blocks)),
            );
        }
        Ok(Self { services })
    }

    /// Builds clients for every supported network from the environment.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_env() -> DataResult<Self> {
        Self::new(Network::ALL.into_iter().map(NetworkConfig::from_env))
    }

    /// Returns the query service for `network`.
    ///
    /// # Errors
    /// Returns an error if the network was not registered.
    pub fn get(&self, network: Network) -> DataResult<Arc<SubgraphQueryService>> {
        self.services
            .get(&network)
            .cloned()
            .ok_or_else(|| DataError::UnknownNetwork(network.to_string()))
    }
}
