//! Bond market valuation and fetching

pub mod clock;
pub mod config;
pub mod demo;
pub mod depository;
pub mod display;
pub mod fetcher;
pub mod oracle;
pub mod registry;
pub mod service;
pub mod settle;
pub mod valuation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::BondEngineConfig;
pub use depository::{BondDepository, InMemoryDepository};
pub use display::{prettify_seconds, BondDuration, DurationView, Resolution};
pub use fetcher::BondFetcher;
pub use oracle::{PoolState, PriceOracle, StaticPriceOracle};
pub use registry::{StaticTokenRegistry, TokenRegistry};
pub use service::BondService;
pub use settle::{fulfilled, settle_all, Settled};
pub use valuation::{compute_bond, ValuationInput};
