//! Token descriptors
//!
//! A bond's quote token is either a plain ERC-20 or a liquidity-pool token.
//! Code that only needs the symbol, address and decimal scale works through
//! [`TokenInfo`] and never matches on the concrete variant.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Contract address, normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Address as a lowercase string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address(value.trim().to_ascii_lowercase())
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::from(value.to_string())
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability shared by every token kind
pub trait TokenInfo {
    /// Ticker symbol
    fn symbol(&self) -> &str;
    /// Contract address
    fn address(&self) -> &Address;
    /// Decimal scale of raw on-chain amounts
    fn decimals(&self) -> u32;
}

/// Plain fungible token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Token {
    /// Ticker symbol (e.g., "OHM")
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Contract address
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub address: Address,
    /// Decimal scale
    pub decimals: u32,
}

impl Token {
    /// Create a new token descriptor
    pub fn new(symbol: &str, name: &str, address: impl Into<Address>, decimals: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            address: address.into(),
            decimals,
        }
    }
}

impl TokenInfo for Token {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn address(&self) -> &Address {
        &self.address
    }

    fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// Liquidity-pool token backed by two underlying tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct LpToken {
    /// Ticker symbol (e.g., "OHM-DAI LP")
    pub symbol: String,
    /// Pool contract address
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub address: Address,
    /// Decimal scale of the pool share token
    pub decimals: u32,
    /// First underlying token
    pub token0: Token,
    /// Second underlying token
    pub token1: Token,
}

impl TokenInfo for LpToken {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn address(&self) -> &Address {
        &self.address
    }

    fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// Token a bond market accepts as payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteToken {
    /// Plain token
    Token(Token),
    /// Liquidity-pool token
    Lp(LpToken),
}

impl QuoteToken {
    fn info(&self) -> &dyn TokenInfo {
        match self {
            QuoteToken::Token(token) => token,
            QuoteToken::Lp(lp) => lp,
        }
    }
}

impl TokenInfo for QuoteToken {
    fn symbol(&self) -> &str {
        self.info().symbol()
    }

    fn address(&self) -> &Address {
        self.info().address()
    }

    fn decimals(&self) -> u32 {
        self.info().decimals()
    }
}

impl From<Token> for QuoteToken {
    fn from(token: Token) -> Self {
        QuoteToken::Token(token)
    }
}

impl From<LpToken> for QuoteToken {
    fn from(lp: LpToken) -> Self {
        QuoteToken::Lp(lp)
    }
}
