//! Live bond fetching
//!
//! For every live market id the fetcher reads the market and its terms, resolves
//! the quote token, looks up prices and values the bond. Each market runs as its
//! own pipeline; a failing market is logged and left out of the result.

use std::sync::Arc;

use common::decimal::{self, Price};
use common::error::{Error, ErrorExt, Result};
use common::model::bond::Bond;
use common::model::market::MarketId;
use common::model::network::NetworkId;
use common::model::token::{Token, TokenInfo};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::depository::BondDepository;
use crate::oracle::{self, PriceOracle};
use crate::registry::TokenRegistry;
use crate::settle::{settle_all, Settled};
use crate::valuation::{compute_bond, ValuationInput};

/// Fetches and values live bond markets
pub struct BondFetcher {
    /// Depository contract client
    depository: Arc<dyn BondDepository>,
    /// Known tokens
    registry: Arc<dyn TokenRegistry>,
    /// USD prices
    oracle: Arc<dyn PriceOracle>,
    /// Current time for fixed-expiration durations
    clock: Arc<dyn Clock>,
}

impl BondFetcher {
    /// Create a fetcher using the system clock
    pub fn new(
        depository: Arc<dyn BondDepository>,
        registry: Arc<dyn TokenRegistry>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        Self::with_clock(depository, registry, oracle, Arc::new(SystemClock))
    }

    /// Create a fetcher with an explicit clock
    pub fn with_clock(
        depository: Arc<dyn BondDepository>,
        registry: Arc<dyn TokenRegistry>,
        oracle: Arc<dyn PriceOracle>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            depository,
            registry,
            oracle,
            clock,
        }
    }

    /// Clock used for valuation
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Value every live market on `network`
    ///
    /// Only the live-market listing and the base token lookup can fail the
    /// whole call. Markets that fail to value are dropped from the result,
    /// which comes back in completion order.
    pub async fn fetch_bonds(&self, network: NetworkId) -> Result<Vec<Bond>> {
        let base_token = self.base_token(network)?;
        let ids = self
            .depository
            .live_markets(network)
            .await
            .with_context(|| format!("Failed to list live markets on {}", network))?;

        debug!("Valuing {} live markets on {}", ids.len(), network);

        let outcomes = settle_all(
            ids.iter()
                .map(|&id| self.value_market(network, id, &base_token)),
        )
        .await;

        let total = outcomes.len();
        let mut bonds = Vec::with_capacity(total);
        for outcome in outcomes {
            match outcome {
                Settled::Fulfilled(bond) => bonds.push(bond),
                Settled::Rejected(err) => warn!("Dropping market on {}: {}", network, err),
            }
        }

        info!("Fetched {} of {} bonds on {}", bonds.len(), total, network);
        Ok(bonds)
    }

    /// Value a single live market, surfacing its error
    ///
    /// Closed markets are reported as `MarketNotFound`, matching their absence
    /// from `fetch_bonds`.
    pub async fn fetch_bond(&self, network: NetworkId, id: MarketId) -> Result<Bond> {
        let base_token = self.base_token(network)?;
        let ids = self
            .depository
            .live_markets(network)
            .await
            .with_context(|| format!("Failed to list live markets on {}", network))?;

        if !ids.contains(&id) {
            return Err(Error::MarketNotFound(format!("market {} is not live on {}", id, network)));
        }

        self.value_market(network, id, &base_token).await
    }

    fn base_token(&self, network: NetworkId) -> Result<Token> {
        self.registry
            .base_token(network)
            .ok_or_else(|| Error::ConfigurationError(format!("No base token registered for {}", network)))
    }

    /// Full pipeline for one market
    async fn value_market(&self, network: NetworkId, id: MarketId, base_token: &Token) -> Result<Bond> {
        let context = || format!("market {}", id);

        let (market, terms) = futures::try_join!(
            self.depository.market(network, id),
            self.depository.terms(network, id),
        )
        .with_context(context)?;

        let quote_token = self
            .registry
            .token_by_address(network, &market.quote_token)
            .ok_or_else(|| Error::UnknownToken(format!("market {}: {}", id, market.quote_token)))?;

        let (base_token_per_usd, quote_token_per_usd, raw_market_price) = futures::try_join!(
            self.oracle.token_price(network, base_token),
            oracle::usd_price(self.oracle.as_ref(), network, &quote_token),
            self.depository.market_price(network, id),
        )
        .with_context(context)?;

        let quote_token_per_base_token: Price = decimal::from_raw(raw_market_price, base_token.decimals())
            .with_context(context)?;

        let input = ValuationInput {
            id,
            market: &market,
            terms: &terms,
            base_token,
            quote_token: &quote_token,
            quote_token_per_base_token,
            base_token_per_usd,
            quote_token_per_usd,
        };

        let bond = compute_bond(&input, self.clock.now())?;
        debug!(
            "Valued market {} ({}) on {}: discount {}, sold out {}",
            id,
            quote_token.symbol(),
            network,
            bond.discount,
            bond.is_sold_out
        );

        Ok(bond)
    }
}
