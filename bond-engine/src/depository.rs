//! Bond depository contract client

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::market::{MarketId, RawMarket, Terms};
use common::model::network::NetworkId;
use dashmap::DashMap;
use tracing::debug;

/// Read-only view of the bond depository contract
#[async_trait]
pub trait BondDepository: Send + Sync {
    /// Ids of markets that are currently open
    async fn live_markets(&self, network: NetworkId) -> Result<Vec<MarketId>>;

    /// Market state
    async fn market(&self, network: NetworkId, id: MarketId) -> Result<RawMarket>;

    /// Market terms
    async fn terms(&self, network: NetworkId, id: MarketId) -> Result<Terms>;

    /// Raw quote-token-per-base-token price at base-token scale
    async fn market_price(&self, network: NetworkId, id: MarketId) -> Result<u128>;
}

/// Market as stored by the in-memory depository
#[derive(Debug, Clone)]
pub struct MarketEntry {
    /// Market state
    pub market: RawMarket,
    /// Market terms
    pub terms: Terms,
    /// Raw market price
    pub market_price: u128,
    /// Whether the market is listed by `live_markets`
    pub live: bool,
}

/// In-memory depository for tests, demos and local runs
pub struct InMemoryDepository {
    /// Markets by network and id
    pub markets: DashMap<(NetworkId, MarketId), MarketEntry>,
    /// Markets whose contract calls fail
    failing: RwLock<HashSet<(NetworkId, MarketId)>>,
    /// Networks whose `live_markets` call fails
    unavailable: RwLock<HashSet<NetworkId>>,
}

impl InMemoryDepository {
    /// Create an empty depository
    pub fn new() -> Self {
        Self {
            markets: DashMap::new(),
            failing: RwLock::new(HashSet::new()),
            unavailable: RwLock::new(HashSet::new()),
        }
    }

    /// Add or replace a live market
    pub fn insert_market(
        &self,
        network: NetworkId,
        id: MarketId,
        market: RawMarket,
        terms: Terms,
        market_price: u128,
    ) {
        self.markets.insert(
            (network, id),
            MarketEntry {
                market,
                terms,
                market_price,
                live: true,
            },
        );
    }

    /// Close a market so it is no longer listed as live
    pub fn close_market(&self, network: NetworkId, id: MarketId) {
        if let Some(mut entry) = self.markets.get_mut(&(network, id)) {
            entry.live = false;
        }
    }

    /// Make every contract call for a market fail
    pub fn fail_market(&self, network: NetworkId, id: MarketId) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert((network, id));
        }
    }

    /// Make `live_markets` fail for a network
    pub fn set_unavailable(&self, network: NetworkId, unavailable: bool) {
        if let Ok(mut set) = self.unavailable.write() {
            if unavailable {
                set.insert(network);
            } else {
                set.remove(&network);
            }
        }
    }

    fn entry(&self, network: NetworkId, id: MarketId) -> Result<MarketEntry> {
        let failing = self
            .failing
            .read()
            .map(|set| set.contains(&(network, id)))
            .unwrap_or(false);
        if failing {
            return Err(Error::Rpc(format!("call reverted for market {} on {}", id, network)));
        }

        self.markets
            .get(&(network, id))
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::MarketNotFound(format!("market {} on {}", id, network)))
    }
}

impl Default for InMemoryDepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BondDepository for InMemoryDepository {
    async fn live_markets(&self, network: NetworkId) -> Result<Vec<MarketId>> {
        let unavailable = self
            .unavailable
            .read()
            .map(|set| set.contains(&network))
            .unwrap_or(false);
        if unavailable {
            return Err(Error::Rpc(format!("{} node unavailable", network)));
        }

        let mut ids: Vec<MarketId> = self
            .markets
            .iter()
            .filter(|entry| entry.key().0 == network && entry.value().live)
            .map(|entry| entry.key().1)
            .collect();
        ids.sort_unstable();

        debug!("{} live markets on {}", ids.len(), network);
        Ok(ids)
    }

    async fn market(&self, network: NetworkId, id: MarketId) -> Result<RawMarket> {
        self.entry(network, id).map(|entry| entry.market)
    }

    async fn terms(&self, network: NetworkId, id: MarketId) -> Result<Terms> {
        self.entry(network, id).map(|entry| entry.terms)
    }

    async fn market_price(&self, network: NetworkId, id: MarketId) -> Result<u128> {
        self.entry(network, id).map(|entry| entry.market_price)
    }
}
