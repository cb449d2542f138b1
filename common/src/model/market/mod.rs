//! Raw bond market data as read from the depository contract

use serde::{Deserialize, Serialize};

use crate::model::token::Address;

/// Market identifier assigned by the depository contract
pub type MarketId = u64;

/// Market state returned by `markets(id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarket {
    /// Remaining capacity, raw integer
    pub capacity: u128,
    /// Whether `capacity` is denominated in the quote token
    pub capacity_in_quote: bool,
    /// Max payout per deposit interval, raw integer in the base token
    pub max_payout: u128,
    /// Address of the token the market accepts
    pub quote_token: Address,
}

/// Market terms returned by `terms(id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    /// Fixed-term (true) or fixed-expiration (false)
    pub fixed_term: bool,
    /// Vesting length in seconds, used for fixed-term markets
    pub vesting: u64,
    /// Unix timestamp of maturity, used for fixed-expiration markets
    pub conclusion: i64,
}
