//! Demo markets for local runs
//!
//! Seeds an in-memory depository, registry and oracle with a spread of market
//! shapes: fixed-term, fixed-expiration, quote-denominated capacity, an LP
//! quote token, a sold-out market and one with an unregistered quote token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::decimal::dec;
use common::model::market::{MarketId, RawMarket, Terms};
use common::model::network::NetworkId;
use common::model::token::{Address, LpToken, Token};

use crate::clock::Clock;
use crate::depository::InMemoryDepository;
use crate::fetcher::BondFetcher;
use crate::oracle::{PoolState, StaticPriceOracle};
use crate::registry::StaticTokenRegistry;

pub const OHM: &str = "0x64aa3364f17a4d01c6f1751fd97c2bd3d7e7f1d5";
pub const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
pub const FRAX: &str = "0x853d955acef822db058eb8505911ed77f175b99e";
pub const OHM_DAI_LP: &str = "0x055475920a8c93cffb64d039a8205f7acc7722d3";
pub const UNLISTED: &str = "0x00000000000000000000000000000000deadbeef";

pub const TESTNET_OHM: &str = "0x0595328847af962f951a4f8f8ee9a3bf261e4f6b";
pub const TESTNET_DAI: &str = "0x41e38e70a36150d08a8c97aec194321b5eb545a5";

/// DAI, fixed-term, capacity in OHM
pub const DAI_MARKET: MarketId = 0;
/// FRAX, fixed-expiration, capacity in FRAX
pub const FRAX_MARKET: MarketId = 1;
/// OHM-DAI LP, fixed-term, capacity in LP tokens
pub const LP_MARKET: MarketId = 2;
/// DAI, less than one OHM of capacity left
pub const SOLD_OUT_MARKET: MarketId = 3;
/// Quote token missing from the registry
pub const UNLISTED_MARKET: MarketId = 4;

const DAY: u64 = 86_400;
const OHM_UNIT: u128 = 1_000_000_000;
const WEI: u128 = 1_000_000_000_000_000_000;

/// Seeded collaborators
pub struct Demo {
    /// Depository holding the demo markets
    pub depository: Arc<InMemoryDepository>,
    /// Registry of demo tokens
    pub registry: Arc<StaticTokenRegistry>,
    /// Oracle with demo prices
    pub oracle: Arc<StaticPriceOracle>,
}

impl Demo {
    /// Fetcher over the demo collaborators
    pub fn fetcher(&self, clock: Arc<dyn Clock>) -> BondFetcher {
        BondFetcher::with_clock(
            self.depository.clone(),
            self.registry.clone(),
            self.oracle.clone(),
            clock,
        )
    }
}

fn ohm() -> Token {
    Token::new("OHM", "Olympus", OHM, 9)
}

fn dai() -> Token {
    Token::new("DAI", "Dai", DAI, 18)
}

fn frax() -> Token {
    Token::new("FRAX", "Frax", FRAX, 18)
}

fn ohm_dai_lp() -> LpToken {
    LpToken {
        symbol: "OHM-DAI LP".to_string(),
        address: Address::from(OHM_DAI_LP),
        decimals: 18,
        token0: ohm(),
        token1: dai(),
    }
}

/// Build the demo data; fixed-expiration markets conclude relative to `now`
pub fn seed(now: DateTime<Utc>) -> Demo {
    let mainnet = NetworkId::Mainnet;
    let testnet = NetworkId::Testnet;

    let registry = StaticTokenRegistry::new()
        .with_base_token(mainnet, ohm())
        .with_token(mainnet, dai())
        .with_token(mainnet, frax())
        .with_token(mainnet, ohm_dai_lp())
        .with_base_token(testnet, Token::new("OHM", "Olympus", TESTNET_OHM, 9))
        .with_token(testnet, Token::new("DAI", "Dai", TESTNET_DAI, 18));

    let oracle = StaticPriceOracle::new();
    oracle.set_price(mainnet, OHM, dec!(10));
    oracle.set_price(mainnet, DAI, dec!(1));
    oracle.set_price(mainnet, FRAX, dec!(0.998));
    oracle.set_pool(mainnet, OHM_DAI_LP, PoolState {
        reserve0: dec!(500000),
        reserve1: dec!(5000000),
        total_supply: dec!(50000),
    });
    oracle.set_price(testnet, TESTNET_OHM, dec!(10));
    oracle.set_price(testnet, TESTNET_DAI, dec!(1));

    let depository = InMemoryDepository::new();
    let fixed_term = |days: u64| Terms {
        fixed_term: true,
        vesting: days * DAY,
        conclusion: 0,
    };

    depository.insert_market(
        mainnet,
        DAI_MARKET,
        RawMarket {
            capacity: 100_000 * OHM_UNIT,
            capacity_in_quote: false,
            max_payout: 1_000 * OHM_UNIT,
            quote_token: Address::from(DAI),
        },
        fixed_term(14),
        9_500_000_000,
    );
    depository.insert_market(
        mainnet,
        FRAX_MARKET,
        RawMarket {
            capacity: 500_000 * WEI,
            capacity_in_quote: true,
            max_payout: 2_000 * OHM_UNIT,
            quote_token: Address::from(FRAX),
        },
        Terms {
            fixed_term: false,
            vesting: 0,
            conclusion: now.timestamp() + (30 * DAY) as i64,
        },
        9_800_000_000,
    );
    depository.insert_market(
        mainnet,
        LP_MARKET,
        RawMarket {
            capacity: 50 * WEI,
            capacity_in_quote: true,
            max_payout: 100 * OHM_UNIT,
            quote_token: Address::from(OHM_DAI_LP),
        },
        fixed_term(7),
        48_000_000,
    );
    depository.insert_market(
        mainnet,
        SOLD_OUT_MARKET,
        RawMarket {
            capacity: OHM_UNIT / 2,
            capacity_in_quote: false,
            max_payout: OHM_UNIT / 2,
            quote_token: Address::from(DAI),
        },
        fixed_term(5),
        9_900_000_000,
    );
    depository.insert_market(
        mainnet,
        UNLISTED_MARKET,
        RawMarket {
            capacity: 1_000 * OHM_UNIT,
            capacity_in_quote: false,
            max_payout: 10 * OHM_UNIT,
            quote_token: Address::from(UNLISTED),
        },
        fixed_term(14),
        9_000_000_000,
    );
    depository.insert_market(
        testnet,
        0,
        RawMarket {
            capacity: 10_000 * OHM_UNIT,
            capacity_in_quote: false,
            max_payout: 100 * OHM_UNIT,
            quote_token: Address::from(TESTNET_DAI),
        },
        fixed_term(1),
        9_000_000_000,
    );

    Demo {
        depository: Arc::new(depository),
        registry: Arc::new(registry),
        oracle: Arc::new(oracle),
    }
}
