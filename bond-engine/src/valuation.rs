//! Bond valuation
//!
//! Turns raw `markets(id)` / `terms(id)` data plus token prices into a [`Bond`].
//! Everything here is a pure function of its arguments: the current time is
//! passed in, nothing is read from or written to shared state.

use chrono::{DateTime, Utc};
use common::decimal::{self, precision, Amount, Price};
use common::error::{Error, Result};
use common::model::bond::{Bond, BondPrice, TokenAmount};
use common::model::market::{MarketId, RawMarket, Terms};
use common::model::token::{QuoteToken, Token, TokenInfo};
use rust_decimal::Decimal;

/// Everything needed to value one market
#[derive(Debug, Clone)]
pub struct ValuationInput<'a> {
    /// Market id
    pub id: MarketId,
    /// Raw market state
    pub market: &'a RawMarket,
    /// Raw market terms
    pub terms: &'a Terms,
    /// Token paid out by the bond
    pub base_token: &'a Token,
    /// Token accepted by the bond
    pub quote_token: &'a QuoteToken,
    /// Quote tokens per base token, from `marketPrice(id)` at base-token scale
    pub quote_token_per_base_token: Price,
    /// Base token spot price in USD
    pub base_token_per_usd: Price,
    /// Quote token spot price in USD
    pub quote_token_per_usd: Price,
}

/// Value a single market as of `now`
pub fn compute_bond(input: &ValuationInput<'_>, now: DateTime<Utc>) -> Result<Bond> {
    let rate = input.quote_token_per_base_token;
    if rate <= Decimal::ZERO {
        return Err(Error::ValidationError(format!(
            "market {}: quote token per base token must be positive, got {}",
            input.id, rate
        )));
    }
    if input.base_token_per_usd <= Decimal::ZERO {
        return Err(Error::ValidationError(format!(
            "market {}: base token price must be positive, got {}",
            input.id, input.base_token_per_usd
        )));
    }

    let base_decimals = input.base_token.decimals();

    let price_in_usd = decimal::mul(input.quote_token_per_usd, rate)?;
    let discount = decimal::div_to_scale(
        input.base_token_per_usd - price_in_usd,
        input.base_token_per_usd,
        precision::DISCOUNT_PRECISION,
    )?;

    let duration = duration(input.terms, now);

    let capacity = if input.market.capacity_in_quote {
        let in_quote_token = decimal::from_raw(input.market.capacity, input.quote_token.decimals())?;
        TokenAmount {
            in_base_token: decimal::div_to_scale(in_quote_token, rate, base_decimals)?,
            in_quote_token,
        }
    } else {
        let in_base_token = decimal::from_raw(input.market.capacity, base_decimals)?;
        TokenAmount {
            in_quote_token: decimal::mul(in_base_token, rate)?,
            in_base_token,
        }
    };

    let max_payout_in_base_token = decimal::from_raw(input.market.max_payout, base_decimals)?;
    let max_payout = TokenAmount {
        in_quote_token: decimal::mul(max_payout_in_base_token, rate)?,
        in_base_token: max_payout_in_base_token,
    };

    let is_sold_out = is_sold_out(capacity.in_base_token, max_payout.in_base_token);

    Ok(Bond {
        id: input.id,
        base_token: input.base_token.clone(),
        quote_token: input.quote_token.clone(),
        discount,
        duration,
        is_fixed_term: input.terms.fixed_term,
        is_sold_out,
        price: BondPrice {
            in_usd: price_in_usd,
            in_base_token: rate,
        },
        capacity,
        max_payout,
    })
}

/// Term length for fixed-term markets, seconds until conclusion otherwise
pub fn duration(terms: &Terms, now: DateTime<Utc>) -> Decimal {
    if terms.fixed_term {
        return Decimal::from(terms.vesting);
    }

    let now_secs = Decimal::new(now.timestamp_millis(), precision::DURATION_PRECISION);
    Decimal::from(terms.conclusion) - now_secs
}

/// Less than one whole base token left to sell or pay out
pub fn is_sold_out(capacity_in_base_token: Amount, max_payout_in_base_token: Amount) -> bool {
    Decimal::ONE > capacity_in_base_token || Decimal::ONE > max_payout_in_base_token
}
