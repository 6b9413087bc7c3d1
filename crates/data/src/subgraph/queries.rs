//! GraphQL documents used against the exchange and blocks subgraphs.

use std::fmt::Write;

/// Width of the window searched for the first block after a timestamp.
pub const BLOCK_SEARCH_WINDOW_SECS: u64 = 600;

pub const PAIR: &str = r#"
query pair($id: ID!) {
  pair(id: $id) {
    id
    createdAtTimestamp
    totalSupply
    reserve0
    reserve1
    reserveUSD
    token0 { id symbol derivedNativeCurrency }
    token1 { id symbol derivedNativeCurrency }
  }
}
"#;

pub const NATIVE_CURRENCY_PRICE: &str = r#"
query bundle {
  bundle(id: "1") {
    nativeCurrencyPrice
  }
}
"#;

/// Row limit of each snapshot stream in [`USER_SNAPSHOTS`].
pub const SNAPSHOT_PAGE_SIZE: usize = 1000;

pub const USER_SNAPSHOTS: &str = r#"
query userSnapshots($user: String!) {
  liquidityPositionSnapshots(first: 1000, orderBy: timestamp, orderDirection: asc, where: { user: $user }) {
    timestamp
    pair { id }
    liquidityTokenBalance
    liquidityTokenTotalSupply
    reserve0
    reserve1
    reserveUSD
    token0PriceUSD
    token1PriceUSD
  }
  liquidityMiningPositionSnapshots(first: 1000, orderBy: timestamp, orderDirection: asc, where: { user: $user }) {
    timestamp
    pair { id }
    liquidityTokenBalance
  }
}
"#;

pub const USER_MINTS_BURNS_PER_PAIR: &str = r#"
query mintsAndBurns($user: Bytes!, $pair: String!) {
  mints(where: { to: $user, pair: $pair }) {
    amountUSD
    amount0
    amount1
    timestamp
    pair { token0 { id } token1 { id } }
  }
  burns(where: { sender: $user, pair: $pair }) {
    amountUSD
    amount0
    amount1
    timestamp
    pair { token0 { id } token1 { id } }
  }
}
"#;

/// Response alias for the block or pair at `timestamp`.
#[must_use]
pub fn timestamp_alias(timestamp: u64) -> String {
    format!("t{timestamp}")
}

/// Response alias for the native currency bundle at `timestamp`.
#[must_use]
pub fn bundle_alias(timestamp: u64) -> String {
    format!("b{timestamp}")
}

/// One aliased `blocks` lookup per timestamp, returning the first block in the search window.
#[must_use]
pub fn blocks_at_timestamps(timestamps: &[u64]) -> String {
    let mut query = String::from("query blocks {\n");
    for &ts in timestamps {
        let _ = writeln!(
            query,
            "  {alias}: blocks(first: 1, orderBy: timestamp, orderDirection: asc, where: {{ timestamp_gt: {ts}, timestamp_lt: {end} }}) {{ number }}",
            alias = timestamp_alias(ts),
            end = ts + BLOCK_SEARCH_WINDOW_SECS,
        );
    }
    query.push('}');
    query
}

/// Pair state and native currency price at each `(timestamp, block)`.
#[must_use]
pub fn pair_at_blocks(blocks: &[(u64, u64)]) -> String {
    let mut query = String::from("query shareValues($pair: ID!) {\n");
    for &(ts, block) in blocks {
        let _ = writeln!(
            query,
            "  {alias}: pair(id: $pair, block: {{ number: {block} }}) {{ totalSupply reserve0 reserve1 reserveUSD token0 {{ derivedNativeCurrency }} token1 {{ derivedNativeCurrency }} }}",
            alias = timestamp_alias(ts),
        );
        let _ = writeln!(
            query,
            "  {alias}: bundle(id: \"1\", block: {{ number: {block} }}) {{ nativeCurrencyPrice }}",
            alias = bundle_alias(ts),
        );
    }
    query.push('}');
    query
}
