//! Configuration for the bond engine

use std::env;

use common::model::network::NetworkId;

/// Configuration for the bond engine
#[derive(Debug, Clone)]
pub struct BondEngineConfig {
    /// Seconds a fetched set of bonds stays fresh
    pub cache_ttl_secs: u64,
    /// Network used when a caller does not pick one
    pub default_network: NetworkId,
}

impl Default for BondEngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: env::var("BOND_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            default_network: env::var("DEFAULT_NETWORK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(NetworkId::Mainnet),
        }
    }
}

impl BondEngineConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(cache_ttl_secs: u64, default_network: NetworkId) -> Self {
        Self {
            cache_ttl_secs,
            default_network,
        }
    }
}
