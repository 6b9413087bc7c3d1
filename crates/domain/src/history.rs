//! Day-by-day position history for one pool.
//!
//! Walks calendar days from a start timestamp up to (excluding) the current
//! day. Snapshots inside a day open intra-day windows; each day then closes
//! on a boundary position, taken from a share-value observation when one
//! exists and otherwise synthesized from the pool's current state.

use crate::entities::{PoolState, PositionSnapshot, ShareValue};
use crate::metrics::window_returns;
use crate::time::{SECONDS_PER_DAY, day_index, day_start};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One point of the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalReturn {
    /// Start of the day bucket, unix seconds.
    pub date: u64,
    /// Position value at day close.
    pub usd_value: Decimal,
    /// Fees accumulated from the first day through this day's close.
    pub fees: Decimal,
}

/// Inputs to the historical series.
#[derive(Debug, Clone, Copy)]
pub struct HistoryRequest<'a> {
    /// First day to track, unix seconds.
    pub start_timestamp: u64,
    /// The day containing `now` is excluded.
    pub now: u64,
    /// Current pool state, used to synthesize missing day closes.
    pub pool: &'a PoolState,
    /// Reconciled snapshots for the pool, ascending.
    pub snapshots: &'a [PositionSnapshot],
    /// USD price of the network's native currency.
    pub native_currency_price: Decimal,
}

impl<'a> HistoryRequest<'a> {
    pub fn new(
        start_timestamp: u64,
        now: u64,
        pool: &'a PoolState,
        snapshots: &'a [PositionSnapshot],
        native_currency_price: Decimal,
    ) -> Self {
        Self {
            start_timestamp,
            now,
            pool,
            snapshots,
            native_currency_price,
        }
    }

    /// Day bucket starts covered by the series.
    ///
    /// Tracking begins at the later of the start timestamp's day and the first
    /// snapshot's day. Days before the pool was created are skipped. Empty
    /// when the pool has no creation timestamp or there are no snapshots.
    #[must_use]
    pub fn day_buckets(&self) -> Vec<u64> {
        let Some(created_at) = self.pool.created_at_timestamp else {
            return Vec::new();
        };
        let Some(first) = self.snapshots.first() else {
            return Vec::new();
        };

        let mut index = if first.timestamp > self.start_timestamp {
            day_index(first.timestamp)
        } else {
            day_index(self.start_timestamp)
        };
        let current_index = day_index(self.now);

        let mut days = Vec::new();
        while index < current_index {
            let day = day_start(index);
            if day >= created_at {
                days.push(day);
            }
            index += 1;
        }
        days
    }

    /// Day-close instants for which share values should be requested.
    #[must_use]
    pub fn closing_timestamps(&self) -> Vec<u64> {
        self.day_buckets()
            .into_iter()
            .map(|day| day + SECONDS_PER_DAY)
            .collect()
    }
}

/// Builds the historical value and cumulative fee series.
///
/// `share_values` may cover only some of the [`HistoryRequest::closing_timestamps`];
/// days without an observation close on a position synthesized from the
/// pool's current reserves, supply and prices.
///
/// The snapshot sequence is expected to be the pair-level history while the
/// valuation balance is carried from it, matching how the dashboard charts a
/// provider's pool history.
pub fn historical_series(
    request: &HistoryRequest<'_>,
    share_values: &[ShareValue],
) -> Vec<HistoricalReturn> {
    let days = request.day_buckets();
    let Some(first_snapshot) = request.snapshots.first() else {
        return Vec::new();
    };

    let closes: HashMap<u64, &ShareValue> = share_values
        .iter()
        .map(|share| (share.timestamp, share))
        .collect();

    // Tracking always opens on the earliest snapshot, even when the first
    // tracked day comes after later balance changes.
    let mut position_t0 = first_snapshot.clone();
    let mut running_fees = Decimal::ZERO;
    let mut history = Vec::with_capacity(days.len());

    for day in days {
        let ceiling = day + SECONDS_PER_DAY;

        let daily_changes = request
            .snapshots
            .iter()
            .filter(|s| s.timestamp > day && s.timestamp < ceiling);
        for snapshot in daily_changes {
            if snapshot.timestamp <= position_t0.timestamp {
                continue;
            }
            running_fees += window_returns(&position_t0, snapshot).fees;
            position_t0 = snapshot.clone();
        }

        let balance = position_t0.liquidity_token_balance;
        let position_t1 = match closes.get(&ceiling) {
            Some(share) => (*share).clone().into_position(&request.pool.id, balance),
            None => {
                request
                    .pool
                    .synthesize_position(balance, request.native_currency_price, ceiling)
            }
        };

        running_fees += window_returns(&position_t0, &position_t1).fees;
        history.push(HistoricalReturn {
            date: day,
            usd_value: position_t1.value_usd(),
            fees: running_fees,
        });

        position_t0 = position_t1;
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PoolToken;
    use rust_decimal_macros::dec;

    const DAY0: u64 = 18_000 * SECONDS_PER_DAY;

    fn pool(created_at: Option<u64>) -> PoolState {
        PoolState {
            id: "0xpair".to_string(),
            token0: PoolToken::new("0xa", "AAA", dec!(0.001)),
            token1: PoolToken::new("0xb", "BBB", dec!(0.001)),
            reserve0: dec!(5000),
            reserve1: dec!(5000),
            reserve_usd: dec!(10000),
            total_supply: dec!(1000),
            created_at_timestamp: created_at,
        }
    }

    fn snapshot(timestamp: u64, balance: Decimal) -> PositionSnapshot {
        PositionSnapshot {
            pair_id: "0xpair".to_string(),
            timestamp,
            liquidity_token_balance: balance,
            liquidity_token_total_supply: dec!(1000),
            reserve0: dec!(5000),
            reserve1: dec!(5000),
            reserve_usd: dec!(10000),
            token0_price_usd: dec!(1),
            token1_price_usd: dec!(1),
        }
    }

    fn share(timestamp: u64, growth: Decimal) -> ShareValue {
        ShareValue {
            timestamp,
            total_supply: dec!(1000),
            reserve0: dec!(5000) * growth,
            reserve1: dec!(5000) * growth,
            reserve_usd: dec!(10000) * growth,
            token0_price_usd: dec!(1),
            token1_price_usd: dec!(1),
        }
    }

    #[test]
    fn test_history_without_creation_time_is_empty() {
        let pool = pool(None);
        let snapshots = vec![snapshot(DAY0, dec!(100))];
        let request = HistoryRequest::new(DAY0, DAY0 + 5 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        assert!(request.day_buckets().is_empty());
        assert!(historical_series(&request, &[]).is_empty());
    }

    #[test]
    fn test_history_without_snapshots_is_empty() {
        let pool = pool(Some(0));
        let request = HistoryRequest::new(DAY0, DAY0 + 5 * SECONDS_PER_DAY, &pool, &[], dec!(1000));

        assert!(historical_series(&request, &[]).is_empty());
    }

    #[test]
    fn test_history_skips_days_before_pool_creation() {
        let pool = pool(Some(DAY0 + 2 * SECONDS_PER_DAY));
        let snapshots = vec![snapshot(DAY0, dec!(100))];
        let request = HistoryRequest::new(DAY0, DAY0 + 5 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        let series = historical_series(&request, &[]);
        let dates: Vec<u64> = series.iter().map(|p| p.date).collect();

        assert_eq!(
            dates,
            vec![
                DAY0 + 2 * SECONDS_PER_DAY,
                DAY0 + 3 * SECONDS_PER_DAY,
                DAY0 + 4 * SECONDS_PER_DAY,
            ]
        );
    }

    #[test]
    fn test_history_excludes_current_day() {
        let pool = pool(Some(0));
        let snapshots = vec![snapshot(DAY0, dec!(100))];
        // "now" is midway through day 2.
        let request = HistoryRequest::new(
            DAY0,
            DAY0 + 2 * SECONDS_PER_DAY + 3600,
            &pool,
            &snapshots,
            dec!(1000),
        );

        assert_eq!(request.day_buckets(), vec![DAY0, DAY0 + SECONDS_PER_DAY]);
        assert_eq!(
            request.closing_timestamps(),
            vec![DAY0 + SECONDS_PER_DAY, DAY0 + 2 * SECONDS_PER_DAY]
        );
    }

    #[test]
    fn test_history_starts_at_first_snapshot_day() {
        let pool = pool(Some(0));
        let snapshots = vec![snapshot(DAY0 + 2 * SECONDS_PER_DAY + 100, dec!(100))];
        let request = HistoryRequest::new(DAY0, DAY0 + 4 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        assert_eq!(
            request.day_buckets(),
            vec![DAY0 + 2 * SECONDS_PER_DAY, DAY0 + 3 * SECONDS_PER_DAY]
        );
    }

    #[test]
    fn test_history_synthesized_closes_on_flat_pool() {
        // Current pool state equals the snapshot: token prices 0.001 * 1000 = 1 USD.
        let pool = pool(Some(0));
        let snapshots = vec![snapshot(DAY0, dec!(100))];
        let request = HistoryRequest::new(DAY0, DAY0 + 3 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        let series = historical_series(&request, &[]);
        assert_eq!(series.len(), 3);
        for point in series {
            assert_eq!(point.usd_value, dec!(1000));
            assert!(point.fees.abs() < dec!(0.000001));
        }
    }

    #[test]
    fn test_history_accumulates_fees_from_share_values() {
        let pool = pool(Some(0));
        let snapshots = vec![snapshot(DAY0, dec!(100))];
        let request = HistoryRequest::new(DAY0, DAY0 + 3 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        // Reserves grow 1% per day from fees; the last day has no observation.
        let shares = vec![
            share(DAY0 + SECONDS_PER_DAY, dec!(1.01)),
            share(DAY0 + 2 * SECONDS_PER_DAY, dec!(1.02)),
        ];

        let series = historical_series(&request, &shares);
        assert_eq!(series.len(), 3);

        assert_eq!(series[0].usd_value, dec!(1010));
        assert!((series[0].fees - dec!(10)).abs() < dec!(0.000001));

        assert_eq!(series[1].usd_value, dec!(1020));
        assert!((series[1].fees - dec!(20)).abs() < dec!(0.0001));

        // Day 3 falls back to the current pool state, giving back the 2% growth.
        assert_eq!(series[2].usd_value, dec!(1000));
        assert!(series[2].fees.abs() < dec!(0.0001));
    }

    #[test]
    fn test_history_intraday_balance_change() {
        let pool = pool(Some(0));
        let snapshots = vec![
            snapshot(DAY0, dec!(100)),
            snapshot(DAY0 + SECONDS_PER_DAY + 3600, dec!(200)),
        ];
        let request = HistoryRequest::new(DAY0, DAY0 + 3 * SECONDS_PER_DAY, &pool, &snapshots, dec!(1000));

        let series = historical_series(&request, &[]);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].usd_value, dec!(1000));
        // The deposit on day 2 doubles the valued balance from that day on.
        assert_eq!(series[1].usd_value, dec!(2000));
        assert_eq!(series[2].usd_value, dec!(2000));
    }

    #[test]
    fn test_history_opens_on_earliest_snapshot() {
        let pool = pool(Some(0));
        let snapshots = vec![
            snapshot(DAY0, dec!(100)),
            snapshot(DAY0 + SECONDS_PER_DAY + 10, dec!(300)),
        ];
        // Start tracking on day 3, after the day-2 deposit. Only snapshots
        // inside a tracked day move the valued balance.
        let request = HistoryRequest::new(
            DAY0 + 2 * SECONDS_PER_DAY,
            DAY0 + 3 * SECONDS_PER_DAY,
            &pool,
            &snapshots,
            dec!(1000),
        );

        let series = historical_series(&request, &[]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, DAY0 + 2 * SECONDS_PER_DAY);
        assert_eq!(series[0].usd_value, dec!(1000));
    }
}
