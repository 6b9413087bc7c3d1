//! Snapshot reconciliation.
//!
//! Liquidity positions and liquidity-mining stakes are indexed as two
//! separate snapshot streams. When a provider stakes or unstakes, both
//! streams record the same instant: the plain snapshot carries pool reserves
//! and prices, while the mining snapshot carries the balance that still
//! belongs to the provider. This module folds both streams into one
//! chronological sequence of [`PositionSnapshot`].

use crate::entities::{MiningPositionSnapshot, PositionSnapshot, RawSnapshotEvent};
use std::collections::BTreeMap;

/// Snapshots of each kind recorded at one timestamp.
#[derive(Debug, Default)]
struct TimestampGroup {
    liquidity: Option<PositionSnapshot>,
    mining: Option<MiningPositionSnapshot>,
}

impl TimestampGroup {
    /// Records an event. A later event of the same kind replaces the earlier one.
    fn insert(&mut self, event: RawSnapshotEvent) {
        match event {
            RawSnapshotEvent::Liquidity(snapshot) => self.liquidity = Some(snapshot),
            RawSnapshotEvent::Mining(snapshot) => self.mining = Some(snapshot),
        }
    }

    /// Collapses the group into one snapshot.
    ///
    /// Mining-only groups have no reserve or price context and yield `None`.
    fn resolve(self) -> Option<PositionSnapshot> {
        let liquidity = self.liquidity?;
        match self.mining {
            Some(mining) => Some(liquidity.with_balance(mining.liquidity_token_balance)),
            None => Some(liquidity),
        }
    }
}

/// Merges liquidity and mining snapshots into one ascending sequence with one entry per
/// distinct timestamp.
///
/// Precedence, in order:
/// 1. Within a timestamp and kind, the event appearing last in `events` wins.
/// 2. When both kinds share a timestamp, reserves and prices come from the
///    liquidity snapshot and the balance from the mining snapshot.
/// 3. Timestamps with only a mining snapshot are dropped.
pub fn reconcile_snapshots<I>(events: I) -> Vec<PositionSnapshot>
where
    I: IntoIterator<Item = RawSnapshotEvent>,
{
    let mut groups: BTreeMap<u64, TimestampGroup> = BTreeMap::new();
    for event in events {
        groups.entry(event.timestamp()).or_default().insert(event);
    }

    groups
        .into_values()
        .filter_map(TimestampGroup::resolve)
        .collect()
}

/// Reconciles only the snapshots belonging to `pair_id`.
pub fn reconcile_pair_snapshots<'a, I>(events: I, pair_id: &str) -> Vec<PositionSnapshot>
where
    I: IntoIterator<Item = &'a RawSnapshotEvent>,
{
    reconcile_snapshots(
        events
            .into_iter()
            .filter(|event| event.pair_id().eq_ignore_ascii_case(pair_id))
            .cloned(),
    )
}
