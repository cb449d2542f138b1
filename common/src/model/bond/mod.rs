//! Valued bond snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::token::{QuoteToken, Token};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Bond price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BondPrice {
    /// Price of one base token bought through the bond, in USD
    pub in_usd: Decimal,
    /// Quote tokens paid per base token
    pub in_base_token: Decimal,
}

/// Amount expressed in both tokens of a market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    /// Amount in the base token
    pub in_base_token: Decimal,
    /// Amount in the quote token
    pub in_quote_token: Decimal,
}

/// Snapshot of one live bond market at fetch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    /// Market id
    pub id: u64,
    /// Token paid out by the bond
    pub base_token: Token,
    /// Token accepted by the bond
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub quote_token: QuoteToken,
    /// Fractional discount against the base token spot price, may be negative
    pub discount: Decimal,
    /// Vesting length (fixed-term) or seconds until conclusion (fixed-expiration)
    pub duration: Decimal,
    /// Fixed-term market
    pub is_fixed_term: bool,
    /// Remaining capacity or max payout is below one base token
    pub is_sold_out: bool,
    /// Bond price
    pub price: BondPrice,
    /// Remaining capacity
    pub capacity: TokenAmount,
    /// Max payout for the current deposit interval
    pub max_payout: TokenAmount,
}
