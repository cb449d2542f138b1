//! Error types for the bond depository
//!
//! This module provides a unified error handling system for the valuation
//! engine and the API gateway. Most variants describe a failure that belongs
//! to a single bond market; see [`Error::is_market_scoped`].

use std::fmt::Display;
use thiserror::Error;

/// Bond depository error type
#[derive(Debug, Error)]
pub enum Error {
    /// Quote token address is not present in the token registry
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Error when a market cannot be found
    #[error("Market not found: {0}")]
    MarketNotFound(String),

    /// Contract call failed
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Price lookup failed
    #[error("Price oracle error: {0}")]
    PriceOracle(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

impl Error {
    /// Whether this error only affects the valuation of one market
    pub fn is_market_scoped(&self) -> bool {
        matches!(
            self,
            Error::UnknownToken(_)
                | Error::MarketNotFound(_)
                | Error::Rpc(_)
                | Error::PriceOracle(_)
                | Error::ValidationError(_)
                | Error::DecimalError(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::UnknownToken(msg) => Error::UnknownToken(format!("{}: {}", context, msg)),
                Error::MarketNotFound(msg) => Error::MarketNotFound(format!("{}: {}", context, msg)),
                Error::Rpc(msg) => Error::Rpc(format!("{}: {}", context, msg)),
                Error::PriceOracle(msg) => Error::PriceOracle(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Serialization(e) => Error::Serialization(e),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
            }
        })
    }
}

/// Trait for converting other error types to our Error type
pub trait IntoError {
    /// Convert to Error
    fn into_error(self, message: &str) -> Error;
}

impl<E: std::error::Error> IntoError for E {
    fn into_error(self, message: &str) -> Error {
        Error::Internal(format!("{}: {}", message, self))
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}

/// From rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::DecimalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(Error::UnknownToken("0xabc".to_string()));
        let err = result.with_context(|| "market 3").unwrap_err();

        assert!(matches!(err, Error::UnknownToken(_)));
        assert_eq!(err.to_string(), "Unknown token: market 3: 0xabc");
    }

    #[test]
    fn test_market_scope() {
        assert!(Error::Rpc("timeout".into()).is_market_scoped());
        assert!(Error::UnknownToken("0x1".into()).is_market_scoped());
        assert!(!Error::ConfigurationError("no base token".into()).is_market_scoped());
        assert!(!Error::Internal("boom".into()).is_market_scoped());
    }
}
