use crate::entities::PositionSnapshot;
use crate::math::constant_product::{calculate_sqrt_k, no_fee_amounts, price_ratio};
use crate::math::{mul, safe_div};
use crate::metrics::ReturnMetrics;
use rust_decimal::Decimal;

/// Calculates the return attribution for the window between two positions of the same pool.
///
/// The provider's balance is taken from `position_t0` for both ends of the
/// window: ownership at T1 is the T0 balance over the T1 supply, so a change
/// in supply by other providers dilutes (or concentrates) the share.
///
/// # Arguments
///
/// * `position_t0` - Provider state and pool rates at the start of the window
/// * `position_t1` - Pool rates at the end of the window
///
/// # Returns
///
/// * `ReturnMetrics` - USD deltas. Fees and impermanent loss may be negative.
///
/// `net_return` is computed from each side's reported `reserveUSD`, so it is
/// not required to equal `hodl_return + swapr_return` exactly.
pub fn window_returns(
    position_t0: &PositionSnapshot,
    position_t1: &PositionSnapshot,
) -> ReturnMetrics {
    let balance = position_t0.liquidity_token_balance;
    let ownership_t0 = safe_div(balance, position_t0.liquidity_token_total_supply);
    let ownership_t1 = safe_div(balance, position_t1.liquidity_token_total_supply);

    // Deposited amounts at T0 and what the same share holds at T1.
    let token0_amount_t0 = mul(ownership_t0, position_t0.reserve0);
    let token1_amount_t0 = mul(ownership_t0, position_t0.reserve1);
    let token0_amount_t1 = mul(ownership_t1, position_t1.reserve0);
    let token1_amount_t1 = mul(ownership_t1, position_t1.reserve1);

    let token0_price_t1 = position_t1.token0_price_usd;
    let token1_price_t1 = position_t1.token1_price_usd;

    let sqrt_k_t0 = calculate_sqrt_k(token0_amount_t0, token1_amount_t0);
    let ratio_t1 = price_ratio(token0_price_t1, token1_price_t1);

    let (token0_no_fees, token1_no_fees) = if token1_price_t1.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        no_fee_amounts(sqrt_k_t0, ratio_t1)
    };
    let no_fees_usd = mul(token0_no_fees, token0_price_t1) + mul(token1_no_fees, token1_price_t1);

    let fees = mul(token0_amount_t1 - token0_no_fees, token0_price_t1)
        + mul(token1_amount_t1 - token1_no_fees, token1_price_t1);

    // Hodl benchmark: T0 amounts priced at both ends.
    let asset_value_t0 = mul(token0_amount_t0, position_t0.token0_price_usd)
        + mul(token1_amount_t0, position_t0.token1_price_usd);
    let asset_value_t1 =
        mul(token0_amount_t0, token0_price_t1) + mul(token1_amount_t0, token1_price_t1);

    let imp_loss = no_fees_usd - asset_value_t1;

    let net_value_t0 = mul(ownership_t0, position_t0.reserve_usd);
    let net_value_t1 = mul(ownership_t1, position_t1.reserve_usd);

    ReturnMetrics {
        hodl_return: asset_value_t1 - asset_value_t0,
        net_return: net_value_t1 - net_value_t0,
        swapr_return: fees + imp_loss,
        imp_loss,
        fees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_position() -> PositionSnapshot {
        PositionSnapshot {
            pair_id: "0xpair".to_string(),
            timestamp: 1_600_000_000,
            liquidity_token_balance: dec!(100),
            liquidity_token_total_supply: dec!(1000),
            reserve0: dec!(5000),
            reserve1: dec!(5000),
            reserve_usd: dec!(10000),
            token0_price_usd: dec!(1),
            token1_price_usd: dec!(1),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal) {
        let diff = (actual - expected).abs();
        assert!(
            diff < dec!(0.000001),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_window_returns_token0_appreciation() {
        let t0 = base_position();
        let t1 = PositionSnapshot {
            timestamp: t0.timestamp + 3600,
            reserve_usd: dec!(11000),
            token0_price_usd: dec!(1.1),
            ..t0.clone()
        };

        let metrics = window_returns(&t0, &t1);

        // 0.1 * 11000 - 0.1 * 10000
        assert_eq!(metrics.net_return, dec!(100));
        // 500 * 1.1 + 500 * 1 - (500 + 500)
        assert_eq!(metrics.hodl_return, dec!(50));
        assert_close(metrics.swapr_return, metrics.fees + metrics.imp_loss);
    }

    #[test]
    fn test_window_returns_price_move_has_impermanent_loss() {
        let t0 = base_position();
        // Pool rebalanced along the curve to token1 = 4x token0, no fees.
        let t1 = PositionSnapshot {
            reserve0: dec!(10000),
            reserve1: dec!(2500),
            reserve_usd: dec!(20000),
            token0_price_usd: dec!(1),
            token1_price_usd: dec!(4),
            ..t0.clone()
        };

        let metrics = window_returns(&t0, &t1);

        // Hodl: 500 * 1 + 500 * 4 = 2500 vs 1000 at T0.
        assert_eq!(metrics.hodl_return, dec!(1500));
        // No-fee bundle: 1000 token0 + 250 token1 = 2000 USD, 500 below hodl.
        assert_close(metrics.imp_loss, dec!(-500));
        // Reserves sit exactly on the no-fee curve.
        assert_close(metrics.fees, Decimal::ZERO);
        assert_eq!(metrics.net_return, dec!(1000));
    }

    #[test]
    fn test_window_returns_fee_growth() {
        let t0 = base_position();
        // Same prices, reserves grew 1% from fees.
        let t1 = PositionSnapshot {
            reserve0: dec!(5050),
            reserve1: dec!(5050),
            reserve_usd: dec!(10100),
            ..t0.clone()
        };

        let metrics = window_returns(&t0, &t1);
        assert_close(metrics.fees, dec!(10));
        assert_close(metrics.imp_loss, Decimal::ZERO);
        assert_eq!(metrics.hodl_return, Decimal::ZERO);
        assert_eq!(metrics.net_return, dec!(10));
    }

    #[test]
    fn test_window_returns_identical_positions() {
        let t0 = base_position();
        let metrics = window_returns(&t0, &t0);

        assert_close(metrics.fees, Decimal::ZERO);
        assert_close(metrics.imp_loss, Decimal::ZERO);
        assert_eq!(metrics.hodl_return, Decimal::ZERO);
        assert_eq!(metrics.net_return, Decimal::ZERO);
    }

    #[test]
    fn test_window_returns_zero_supply() {
        let t0 = PositionSnapshot {
            liquidity_token_total_supply: Decimal::ZERO,
            ..base_position()
        };
        let t1 = t0.clone();

        let metrics = window_returns(&t0, &t1);
        assert_eq!(metrics, ReturnMetrics::default());
    }

    #[test]
    fn test_window_returns_zero_token0_price() {
        let t0 = base_position();
        let t1 = PositionSnapshot {
            token0_price_usd: Decimal::ZERO,
            ..t0.clone()
        };

        let metrics = window_returns(&t0, &t1);

        // No ratio at T1: the no-fee bundle is empty, all held token1 counts as fees.
        assert_eq!(metrics.fees, dec!(500));
        assert_eq!(metrics.imp_loss, dec!(-500));
        assert_eq!(metrics.swapr_return, Decimal::ZERO);
        assert_eq!(metrics.hodl_return, dec!(-500));
    }

    #[test]
    fn test_window_returns_dilution() {
        let t0 = base_position();
        // Another provider doubled the pool; our balance is unchanged.
        let t1 = PositionSnapshot {
            liquidity_token_total_supply: dec!(2000),
            reserve0: dec!(10000),
            reserve1: dec!(10000),
            reserve_usd: dec!(20000),
            ..t0.clone()
        };

        let metrics = window_returns(&t0, &t1);
        assert_eq!(metrics.net_return, Decimal::ZERO);
        assert_close(metrics.fees, Decimal::ZERO);
    }

    #[test]
    fn test_net_return_depends_only_on_endpoints() {
        let a = base_position();
        let b = PositionSnapshot {
            reserve_usd: dec!(12345),
            liquidity_token_total_supply: dec!(1100),
            token0_price_usd: dec!(1.3),
            ..a.clone()
        };
        let c = PositionSnapshot {
            reserve_usd: dec!(9000),
            liquidity_token_total_supply: dec!(800),
            token1_price_usd: dec!(0.7),
            ..a.clone()
        };

        let direct = window_returns(&a, &c);
        let expected = c.value_usd() - a.value_usd();
        assert_eq!(direct.net_return, expected);

        // Same balance throughout, so the path through B telescopes.
        let via_b = window_returns(&a, &b).net_return + window_returns(&b, &c).net_return;
        assert_close(via_b, expected);
    }
}
