//! Decimal helpers shared by the return calculations.
//!
//! Every division in the return path goes through [`safe_div`] so that
//! legitimate zero states (empty pools, delisted tokens) produce `0`
//! instead of a panic.

pub mod constant_product;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Divides `numerator` by `denominator`, returning zero when the denominator is zero.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Square root of a non-negative decimal.
///
/// Goes through `f64`, which is accurate enough for USD attribution.
/// Negative or non-representable inputs yield zero.
#[must_use]
pub fn sqrt(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value
        .to_f64()
        .map(f64::sqrt)
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

/// Multiplies two decimals, clamping to [`Decimal::MAX`] or [`Decimal::MIN`]
/// if the product overflows.
#[must_use]
pub fn mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.saturating_mul(rhs)
}
