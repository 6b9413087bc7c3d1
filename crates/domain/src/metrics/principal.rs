use crate::config::ReturnsConfig;
use crate::entities::MintBurnEvent;
use crate::math::mul;
use crate::metrics::Principal;
use rust_decimal::Decimal;

/// USD value of a mint or burn.
///
/// Before price discovery the reported `amountUSD` is unreliable, so pools
/// with a listed stablecoin are valued at twice the stablecoin amount
/// (1 USD peg, pool balanced 50/50 by value). Token0 is checked first.
pub fn event_usd_value(event: &MintBurnEvent, config: &ReturnsConfig) -> Decimal {
    if event.timestamp < config.price_discovery_start_timestamp {
        let two = Decimal::TWO;
        if config.price_overrides.contains(&event.token0_id) {
            return mul(event.amount0, two);
        }
        if config.price_overrides.contains(&event.token1_id) {
            return mul(event.amount1, two);
        }
    }
    event.amount_usd
}

/// Sums mints minus burns into the net principal contributed to a pool.
///
/// Order of events does not matter.
pub fn accumulate_principal(
    mints: &[MintBurnEvent],
    burns: &[MintBurnEvent],
    config: &ReturnsConfig,
) -> Principal {
    let mut principal = Principal::default();

    for mint in mints {
        principal.usd += event_usd_value(mint, config);
        principal.amount0 += mint.amount0;
        principal.amount1 += mint.amount1;
    }

    for burn in burns {
        principal.usd -= event_usd_value(burn, config);
        principal.amount0 -= burn.amount0;
        principal.amount1 -= burn.amount1;
    }

    principal
}
