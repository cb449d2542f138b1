//! USD price lookups
//!
//! Plain tokens are priced directly by the oracle. Liquidity-pool tokens are
//! priced from the pool's reserves and the prices of both underlying tokens.

use async_trait::async_trait;
use common::decimal::{self, precision, Amount, Price};
use common::error::{Error, Result};
use common::model::network::NetworkId;
use common::model::token::{Address, LpToken, QuoteToken, Token, TokenInfo};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;

/// Reserves and supply of a liquidity pool, already at token scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    /// Reserve of `token0`
    pub reserve0: Amount,
    /// Reserve of `token1`
    pub reserve1: Amount,
    /// Outstanding pool share tokens
    pub total_supply: Amount,
}

/// Source of USD prices and pool state
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// USD price of one whole token
    async fn token_price(&self, network: NetworkId, token: &Token) -> Result<Price>;

    /// Current reserves of a liquidity pool
    async fn pool_state(&self, network: NetworkId, lp: &LpToken) -> Result<PoolState>;
}

/// USD price of a quote token, whichever kind it is
pub async fn usd_price(oracle: &dyn PriceOracle, network: NetworkId, token: &QuoteToken) -> Result<Price> {
    match token {
        QuoteToken::Token(token) => oracle.token_price(network, token).await,
        QuoteToken::Lp(lp) => lp_price(oracle, network, lp).await,
    }
}

async fn lp_price(oracle: &dyn PriceOracle, network: NetworkId, lp: &LpToken) -> Result<Price> {
    let (pool, price0, price1) = futures::try_join!(
        oracle.pool_state(network, lp),
        oracle.token_price(network, &lp.token0),
        oracle.token_price(network, &lp.token1),
    )?;

    if pool.total_supply <= Decimal::ZERO {
        return Err(Error::PriceOracle(format!("pool {} has no supply", lp.address())));
    }

    let value = decimal::add(
        decimal::mul(pool.reserve0, price0)?,
        decimal::mul(pool.reserve1, price1)?,
    )?;
    let price = decimal::div_to_scale(value, pool.total_supply, precision::USD_PRICE_PRECISION)?;

    debug!("Priced {} at {} USD", lp.symbol(), price);
    Ok(price)
}

/// Oracle serving fixed prices
pub struct StaticPriceOracle {
    /// Prices by network and token address
    prices: DashMap<(NetworkId, Address), Price>,
    /// Pool state by network and pool address
    pools: DashMap<(NetworkId, Address), PoolState>,
}

impl StaticPriceOracle {
    /// Create an oracle with no prices
    pub fn new() -> Self {
        Self {
            prices: DashMap::new(),
            pools: DashMap::new(),
        }
    }

    /// Set the USD price of a token
    pub fn set_price(&self, network: NetworkId, address: impl Into<Address>, price: Price) {
        self.prices.insert((network, address.into()), price);
    }

    /// Remove a token price so lookups fail
    pub fn clear_price(&self, network: NetworkId, address: impl Into<Address>) {
        self.prices.remove(&(network, address.into()));
    }

    /// Set the state of a pool
    pub fn set_pool(&self, network: NetworkId, address: impl Into<Address>, pool: PoolState) {
        self.pools.insert((network, address.into()), pool);
    }
}

impl Default for StaticPriceOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceOracle for StaticPriceOracle {
    async fn token_price(&self, network: NetworkId, token: &Token) -> Result<Price> {
        self.prices
            .get(&(network, token.address.clone()))
            .map(|price| *price)
            .ok_or_else(|| Error::PriceOracle(format!("no price for {} on {}", token.symbol, network)))
    }

    async fn pool_state(&self, network: NetworkId, lp: &LpToken) -> Result<PoolState> {
        self.pools
            .get(&(network, lp.address.clone()))
            .map(|pool| *pool)
            .ok_or_else(|| Error::PriceOracle(format!("no pool state for {} on {}", lp.symbol, network)))
    }
}
