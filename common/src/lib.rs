//! Common types and utilities for the bond depository
//!
//! This library contains shared types, utilities, and abstractions used across
//! the valuation engine and the API gateway. It provides a unified approach to
//! error handling, exact decimal arithmetic, and domain models.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt, IntoError};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
