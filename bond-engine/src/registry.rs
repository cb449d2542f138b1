//! Token registry

use std::collections::HashMap;

use common::model::network::NetworkId;
use common::model::token::{Address, QuoteToken, Token, TokenInfo};

/// Lookup of known token descriptors by address
pub trait TokenRegistry: Send + Sync {
    /// Quote token deployed at `address`, if known
    fn token_by_address(&self, network: NetworkId, address: &Address) -> Option<QuoteToken>;

    /// Token paid out by every bond on `network`
    fn base_token(&self, network: NetworkId) -> Option<Token>;
}

/// Registry built once at startup
#[derive(Debug, Default, Clone)]
pub struct StaticTokenRegistry {
    tokens: HashMap<(NetworkId, Address), QuoteToken>,
    base_tokens: HashMap<NetworkId, Token>,
}

impl StaticTokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base token for a network
    pub fn with_base_token(mut self, network: NetworkId, token: Token) -> Self {
        self.base_tokens.insert(network, token);
        self
    }

    /// Register a quote token
    pub fn with_token(mut self, network: NetworkId, token: impl Into<QuoteToken>) -> Self {
        let token = token.into();
        self.tokens.insert((network, token.address().clone()), token);
        self
    }
}

impl TokenRegistry for StaticTokenRegistry {
    fn token_by_address(&self, network: NetworkId, address: &Address) -> Option<QuoteToken> {
        self.tokens.get(&(network, address.clone())).cloned()
    }

    fn base_token(&self, network: NetworkId) -> Option<Token> {
        self.base_tokens.get(&network).cloned()
    }
}
