use crate::math::{mul, safe_div, sqrt};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Calculates the square root of the constant product invariant for a bundle of tokens.
///
/// formula: sqrt(amount0 * amount1)
///
/// The product is formed in `f64` so that large reserve bundles cannot
/// overflow the decimal range before the root is taken.
pub fn calculate_sqrt_k(amount0: Decimal, amount1: Decimal) -> Decimal {
    let product = match (amount0.to_f64(), amount1.to_f64()) {
        (Some(a0), Some(a1)) => a0 * a1,
        _ => return Decimal::ZERO,
    };
    if !product.is_finite() || product <= 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(product.sqrt()).unwrap_or(Decimal::ZERO)
}

/// Price of token1 quoted in token0, derived from USD prices.
/// Returns zero when token0 has no price.
pub fn price_ratio(token0_price_usd: Decimal, token1_price_usd: Decimal) -> Decimal {
    safe_div(token1_price_usd, token0_price_usd)
}

/// Amounts a constant product position would hold after pure rebalancing
/// to `price_ratio`, with no fees accrued.
///
/// formula: (sqrt_k * sqrt(ratio), sqrt_k / sqrt(ratio))
///
/// Returns `(0, 0)` when the ratio is zero.
pub fn no_fee_amounts(sqrt_k: Decimal, price_ratio: Decimal) -> (Decimal, Decimal) {
    if price_ratio.is_zero() {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let sqrt_ratio = sqrt(price_ratio);
    (mul(sqrt_k, sqrt_ratio), safe_div(sqrt_k, sqrt_ratio))
}
