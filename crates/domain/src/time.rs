//! Day bucketing on unix seconds.

/// Seconds in one day bucket.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Day bucket index: `floor(timestamp / 86400)`.
#[must_use]
pub fn day_index(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY
}

/// Start of the day bucket with the given index.
#[must_use]
pub fn day_start(index: u64) -> u64 {
    index.saturating_mul(SECONDS_PER_DAY)
}
