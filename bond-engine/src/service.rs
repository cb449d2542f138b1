//! Cached bond queries
//!
//! `fetch_bonds` results are memoized per network for a fixed time to live,
//! measured with the fetcher's clock.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::error::Result;
use common::model::bond::Bond;
use common::model::market::MarketId;
use common::model::network::NetworkId;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::config::BondEngineConfig;
use crate::fetcher::BondFetcher;

/// Cached result of one `fetch_bonds` call
#[derive(Debug, Clone)]
struct CachedBonds {
    /// When the bonds were fetched
    fetched_at: DateTime<Utc>,
    /// The bonds
    bonds: Arc<Vec<Bond>>,
}

/// Cache time to live, saturating at the largest representable duration
fn cache_ttl(secs: u64) -> Duration {
    match i64::try_from(secs).ok().and_then(Duration::try_seconds) {
        Some(ttl) => ttl,
        None => {
            warn!("Cache TTL of {}s is out of range, caching without expiry", secs);
            Duration::max_value()
        }
    }
}

/// Bond query service with a per-network cache
pub struct BondService {
    /// Underlying fetcher
    fetcher: BondFetcher,
    /// Cached bonds by network
    cache: DashMap<NetworkId, CachedBonds>,
    /// How long cached bonds stay fresh
    ttl: Duration,
}

impl BondService {
    /// Create a new bond service
    pub fn new(fetcher: BondFetcher, config: &BondEngineConfig) -> Self {
        Self {
            fetcher,
            cache: DashMap::new(),
            ttl: cache_ttl(config.cache_ttl_secs),
        }
    }

    /// Live bonds on `network`, served from cache while fresh
    pub async fn bonds(&self, network: NetworkId) -> Result<Arc<Vec<Bond>>> {
        let now = self.fetcher.clock().now();

        if let Some(cached) = self.cache.get(&network) {
            if now - cached.fetched_at < self.ttl {
                debug!("Serving {} cached bonds for {}", cached.bonds.len(), network);
                return Ok(cached.bonds.clone());
            }
        }

        let bonds = Arc::new(self.fetcher.fetch_bonds(network).await?);
        self.cache.insert(
            network,
            CachedBonds {
                fetched_at: now,
                bonds: bonds.clone(),
            },
        );

        Ok(bonds)
    }

    /// One bond on `network`
    ///
    /// Uses the cached snapshot when it holds the market, otherwise values the
    /// market directly so its error reaches the caller.
    pub async fn bond(&self, network: NetworkId, id: MarketId) -> Result<Bond> {
        let now = self.fetcher.clock().now();

        if let Some(cached) = self.cache.get(&network) {
            if now - cached.fetched_at < self.ttl {
                if let Some(bond) = cached.bonds.iter().find(|bond| bond.id == id) {
                    return Ok(bond.clone());
                }
            }
        }

        self.fetcher.fetch_bond(network, id).await
    }

    /// Drop the cached bonds for `network`
    pub fn invalidate(&self, network: NetworkId) {
        if self.cache.remove(&network).is_some() {
            info!("Invalidated cached bonds for {}", network);
        }
    }
}
