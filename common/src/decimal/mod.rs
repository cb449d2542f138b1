//! Decimal type utilities for exact bond arithmetic
//!
//! On-chain amounts arrive as raw integers at a token's decimal scale. Every
//! conversion goes through [`Decimal`] with an explicit scale, never floats.

use rust_decimal::{Decimal, RoundingStrategy};
pub use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// USD price or token-per-token rate with high precision
pub type Price = Decimal;

/// Token amount with high precision
pub type Amount = Decimal;

/// Precision helpers for common operations
pub mod precision {
    /// Decimal places carried by a bond discount
    pub const DISCOUNT_PRECISION: u32 = 9;

    /// Decimal places carried by a duration in seconds (millisecond clock)
    pub const DURATION_PRECISION: u32 = 3;

    /// Decimal places carried by derived USD prices
    pub const USD_PRICE_PRECISION: u32 = 12;
}

/// Largest mantissa a [`Decimal`] can hold (2^96 - 1)
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Interpret a raw on-chain integer at `decimals` scale
///
/// Raw values wider than a [`Decimal`] mantissa drop their least significant
/// fractional digits until they fit. Only a whole part beyond the decimal
/// range is an error.
pub fn from_raw(raw: u128, decimals: u32) -> Result<Amount> {
    let mut mantissa = raw;
    let mut scale = decimals;
    while scale > 0 && (mantissa > MAX_MANTISSA || scale > Decimal::MAX_SCALE) {
        mantissa /= 10;
        scale -= 1;
    }

    if mantissa > MAX_MANTISSA {
        return Err(Error::DecimalError(format!(
            "raw value {} at scale {} out of range",
            raw, decimals
        )));
    }

    // Fits in 96 bits, so the i128 conversion cannot fail
    Decimal::try_from_i128_with_scale(mantissa as i128, scale)
        .map_err(|e| Error::DecimalError(format!("raw value {} at scale {}: {}", raw, decimals, e)))
}

/// Checked multiplication
///
/// The product keeps at most 28 significant digits. When the exact product
/// needs more, the excess fractional digits are rounded away (banker's
/// rounding), so callers that need a fixed scale should round the result.
pub fn mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| Error::DecimalError(format!("overflow multiplying {} by {}", a, b)))
}

/// Checked addition
pub fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::DecimalError(format!("overflow adding {} to {}", b, a)))
}

/// Checked division, truncated toward zero at exactly `scale` decimal places
pub fn div_to_scale(a: Decimal, b: Decimal, scale: u32) -> Result<Decimal> {
    if b.is_zero() {
        return Err(Error::DecimalError(format!("division of {} by zero", a)));
    }

    let mut quotient = a
        .checked_div(b)
        .ok_or_else(|| Error::DecimalError(format!("overflow dividing {} by {}", a, b)))?
        .round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    quotient.rescale(scale);

    Ok(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(from_raw(1_500_000_000, 9).unwrap(), dec!(1.5));
        assert_eq!(from_raw(25, 0).unwrap(), dec!(25));
        assert_eq!(
            from_raw(1_000_000_000_000_000_000, 18).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_from_raw_beyond_mantissa() {
        // 100 billion tokens at 18 decimals
        let raw = 100_000_000_000 * 10u128.pow(18);
        assert_eq!(from_raw(raw, 18).unwrap(), dec!(100000000000));

        let max = from_raw(u128::MAX, 18).unwrap();
        assert_eq!(max.trunc(), dec!(340282366920938463463));
        assert!(max.scale() < 18);
    }

    #[test]
    fn test_from_raw_out_of_range() {
        assert!(matches!(from_raw(u128::MAX, 0), Err(Error::DecimalError(_))));
        assert!(matches!(from_raw(MAX_MANTISSA + 1, 0), Err(Error::DecimalError(_))));
        assert_eq!(from_raw(MAX_MANTISSA, 0).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_mul_rounds_to_fit() {
        let product = mul(dec!(1234.567890123456789012), dec!(9.123456789012345678)).unwrap();
        assert!(product.scale() <= Decimal::MAX_SCALE);
        assert_eq!(product.round_dp(18), dec!(11263.526798643499467500));
    }

    #[test]
    fn test_div_to_scale_carries_scale() {
        let q = div_to_scale(dec!(1), dec!(10), 9).unwrap();
        assert_eq!(q.to_string(), "0.100000000");
        assert_eq!(q.scale(), 9);
    }

    #[test]
    fn test_div_to_scale_truncates() {
        let q = div_to_scale(dec!(2), dec!(3), 4).unwrap();
        assert_eq!(q, dec!(0.6666));

        let q = div_to_scale(dec!(-2), dec!(3), 4).unwrap();
        assert_eq!(q, dec!(-0.6666));
    }

    #[test]
    fn test_div_by_zero() {
        assert!(matches!(div_to_scale(dec!(1), Decimal::ZERO, 9), Err(Error::DecimalError(_))));
    }
}
