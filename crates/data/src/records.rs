//! Subgraph response records.
//!
//! The subgraph serialises `BigDecimal`/`BigInt` fields as strings. These
//! records mirror the GraphQL shapes and are converted into domain types
//! exactly once, via `TryFrom`.

use lp_returns_domain::entities::{
    MiningPositionSnapshot, MintBurnEvent, PoolState, PoolToken, PositionSnapshot,
    RawSnapshotEvent, ShareValue,
};
use lp_returns_domain::error::{DomainError, DomainResult};
use lp_returns_domain::math::mul;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// A numeric field that may arrive as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(u64),
    Text(String),
}

impl RawNumber {
    /// Parses the value as unix seconds.
    pub fn to_timestamp(&self, field: &'static str) -> DomainResult<u64> {
        match self {
            RawNumber::Int(v) => Ok(*v),
            RawNumber::Text(s) => s.trim().parse::<u64>().map_err(|_| DomainError::InvalidTimestamp {
                field,
                value: s.clone(),
            }),
        }
    }
}

/// Parses a subgraph decimal string, accepting scientific notation.
pub fn parse_decimal(field: &'static str, value: &str) -> DomainResult<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::InvalidDecimal {
            field,
            value: value.to_string(),
        })
}

fn parse_optional_decimal(field: &'static str, value: Option<&str>) -> DomainResult<Decimal> {
    value.map_or(Ok(Decimal::ZERO), |v| parse_decimal(field, v))
}

/// Reference to an entity by id.
#[derive(Debug, Clone, Deserialize)]
pub struct IdRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRecord {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "derivedNativeCurrency")]
    pub derived_native_currency: String,
}

impl TryFrom<TokenRecord> for PoolToken {
    type Error = DomainError;

    fn try_from(record: TokenRecord) -> Result<Self, Self::Error> {
        Ok(PoolToken {
            derived_native_currency: parse_decimal(
                "derivedNativeCurrency",
                &record.derived_native_currency,
            )?,
            id: record.id,
            symbol: record.symbol,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairRecord {
    pub id: String,
    #[serde(rename = "createdAtTimestamp", default)]
    pub created_at_timestamp: Option<RawNumber>,
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    pub token0: TokenRecord,
    pub token1: TokenRecord,
}

impl TryFrom<PairRecord> for PoolState {
    type Error = DomainError;

    fn try_from(record: PairRecord) -> Result<Self, Self::Error> {
        let created_at_timestamp = match &record.created_at_timestamp {
            Some(raw) => Some(raw.to_timestamp("createdAtTimestamp")?),
            None => None,
        }
        // An unpopulated pair reports 0.
        .filter(|ts| *ts > 0);

        Ok(PoolState {
            total_supply: parse_decimal("totalSupply", &record.total_supply)?,
            reserve0: parse_decimal("reserve0", &record.reserve0)?,
            reserve1: parse_decimal("reserve1", &record.reserve1)?,
            reserve_usd: parse_decimal("reserveUSD", &record.reserve_usd)?,
            token0: record.token0.try_into()?,
            token1: record.token1.try_into()?,
            id: record.id,
            created_at_timestamp,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityPositionSnapshotRecord {
    pub timestamp: RawNumber,
    pub pair: IdRecord,
    #[serde(rename = "liquidityTokenBalance")]
    pub liquidity_token_balance: String,
    #[serde(rename = "liquidityTokenTotalSupply")]
    pub liquidity_token_total_supply: String,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    #[serde(rename = "token0PriceUSD")]
    pub token0_price_usd: String,
    #[serde(rename = "token1PriceUSD")]
    pub token1_price_usd: String,
}

impl TryFrom<LiquidityPositionSnapshotRecord> for PositionSnapshot {
    type Error = DomainError;

    fn try_from(record: LiquidityPositionSnapshotRecord) -> Result<Self, Self::Error> {
        Ok(PositionSnapshot {
            timestamp: record.timestamp.to_timestamp("timestamp")?,
            liquidity_token_balance: parse_decimal(
                "liquidityTokenBalance",
                &record.liquidity_token_balance,
            )?,
            liquidity_token_total_supply: parse_decimal(
                "liquidityTokenTotalSupply",
                &record.liquidity_token_total_supply,
            )?,
            reserve0: parse_decimal("reserve0", &record.reserve0)?,
            reserve1: parse_decimal("reserve1", &record.reserve1)?,
            reserve_usd: parse_decimal("reserveUSD", &record.reserve_usd)?,
            token0_price_usd: parse_decimal("token0PriceUSD", &record.token0_price_usd)?,
            token1_price_usd: parse_decimal("token1PriceUSD", &record.token1_price_usd)?,
            pair_id: record.pair.id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MiningPositionSnapshotRecord {
    pub timestamp: RawNumber,
    pub pair: IdRecord,
    #[serde(rename = "liquidityTokenBalance")]
    pub liquidity_token_balance: String,
}

impl TryFrom<MiningPositionSnapshotRecord> for MiningPositionSnapshot {
    type Error = DomainError;

    fn try_from(record: MiningPositionSnapshotRecord) -> Result<Self, Self::Error> {
        Ok(MiningPositionSnapshot {
            timestamp: record.timestamp.to_timestamp("timestamp")?,
            liquidity_token_balance: parse_decimal(
                "liquidityTokenBalance",
                &record.liquidity_token_balance,
            )?,
            pair_id: record.pair.id,
        })
    }
}

/// Both snapshot streams of one user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSnapshotsRecord {
    #[serde(rename = "liquidityPositionSnapshots", default)]
    pub liquidity: Vec<LiquidityPositionSnapshotRecord>,
    #[serde(rename = "liquidityMiningPositionSnapshots", default)]
    pub mining: Vec<MiningPositionSnapshotRecord>,
}

impl UserSnapshotsRecord {
    /// Whether either stream came back with `limit` rows, meaning older or
    /// newer snapshots may be missing.
    #[must_use]
    pub fn is_truncated(&self, limit: usize) -> bool {
        self.liquidity.len() >= limit || self.mining.len() >= limit
    }

    /// Converts both streams into raw snapshot events, liquidity snapshots first.
    pub fn into_events(self) -> DomainResult<Vec<RawSnapshotEvent>> {
        let mut events = Vec::with_capacity(self.liquidity.len() + self.mining.len());
        for snapshot in self.liquidity {
            events.push(RawSnapshotEvent::Liquidity(snapshot.try_into()?));
        }
        for snapshot in self.mining {
            events.push(RawSnapshotEvent::Mining(snapshot.try_into()?));
        }
        Ok(events)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MintBurnPairRecord {
    pub token0: IdRecord,
    pub token1: IdRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MintBurnRecord {
    pub timestamp: RawNumber,
    #[serde(default)]
    pub amount0: Option<String>,
    #[serde(default)]
    pub amount1: Option<String>,
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<String>,
    pub pair: MintBurnPairRecord,
}

impl TryFrom<MintBurnRecord> for MintBurnEvent {
    type Error = DomainError;

    fn try_from(record: MintBurnRecord) -> Result<Self, Self::Error> {
        Ok(MintBurnEvent {
            timestamp: record.timestamp.to_timestamp("timestamp")?,
            amount0: parse_optional_decimal("amount0", record.amount0.as_deref())?,
            amount1: parse_optional_decimal("amount1", record.amount1.as_deref())?,
            amount_usd: parse_optional_decimal("amountUSD", record.amount_usd.as_deref())?,
            token0_id: record.pair.token0.id,
            token1_id: record.pair.token1.id,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MintsAndBurnsRecord {
    #[serde(default)]
    pub mints: Vec<MintBurnRecord>,
    #[serde(default)]
    pub burns: Vec<MintBurnRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleRecord {
    #[serde(rename = "nativeCurrencyPrice")]
    pub native_currency_price: String,
}

impl BundleRecord {
    pub fn price(&self) -> DomainResult<Decimal> {
        parse_decimal("nativeCurrencyPrice", &self.native_currency_price)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    pub number: RawNumber,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DerivedPriceRecord {
    #[serde(rename = "derivedNativeCurrency")]
    pub derived_native_currency: String,
}

/// Pair state read at a historical block.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalPairRecord {
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    pub token0: DerivedPriceRecord,
    pub token1: DerivedPriceRecord,
}

impl HistoricalPairRecord {
    /// Builds the share value at `timestamp` using the native currency price of the same block.
    pub fn into_share_value(
        self,
        timestamp: u64,
        native_currency_price: Decimal,
    ) -> DomainResult<ShareValue> {
        let token0 = parse_decimal("derivedNativeCurrency", &self.token0.derived_native_currency)?;
        let token1 = parse_decimal("derivedNativeCurrency", &self.token1.derived_native_currency)?;
        Ok(ShareValue {
            timestamp,
            total_supply: parse_decimal("totalSupply", &self.total_supply)?,
            reserve0: parse_decimal("reserve0", &self.reserve0)?,
            reserve1: parse_decimal("reserve1", &self.reserve1)?,
            reserve_usd: parse_decimal("reserveUSD", &self.reserve_usd)?,
            token0_price_usd: mul(token0, native_currency_price),
            token1_price_usd: mul(token1, native_currency_price),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("x", "1.5").unwrap(), dec!(1.5));
        assert_eq!(parse_decimal("x", "1e-3").unwrap(), dec!(0.001));
        assert!(matches!(
            parse_decimal("reserve0", "abc"),
            Err(DomainError::InvalidDecimal { field: "reserve0", .. })
        ));
    }

    #[test]
    fn test_pair_record_conversion() {
        let value = json!({
            "id": "0xpair",
            "createdAtTimestamp": "1600000000",
            "totalSupply": "1000",
            "reserve0": "5000.5",
            "reserve1": "5000",
            "reserveUSD": "10000",
            "token0": { "id": "0xa", "symbol": "AAA", "derivedNativeCurrency": "0.0005" },
            "token1": { "id": "0xb", "symbol": "BBB", "derivedNativeCurrency": "0.0005" }
        });

        let record: PairRecord = serde_json::from_value(value).unwrap();
        let pool = PoolState::try_from(record).unwrap();

        assert_eq!(pool.id, "0xpair");
        assert_eq!(pool.created_at_timestamp, Some(1_600_000_000));
        assert_eq!(pool.reserve0, dec!(5000.5));
        assert_eq!(pool.token1.derived_native_currency, dec!(0.0005));
    }

    #[test]
    fn test_pair_record_zero_creation_time_is_missing() {
        let value = json!({
            "id": "0xpair",
            "createdAtTimestamp": "0",
            "totalSupply": "0",
            "reserve0": "0",
            "reserve1": "0",
            "reserveUSD": "0",
            "token0": { "id": "0xa", "derivedNativeCurrency": "0" },
            "token1": { "id": "0xb", "derivedNativeCurrency": "0" }
        });

        let record: PairRecord = serde_json::from_value(value).unwrap();
        let pool = PoolState::try_from(record).unwrap();
        assert_eq!(pool.created_at_timestamp, None);
    }

    #[test]
    fn test_user_snapshots_conversion() {
        let value = json!({
            "liquidityPositionSnapshots": [{
                "timestamp": 100,
                "pair": { "id": "0xpair" },
                "liquidityTokenBalance": "0",
                "liquidityTokenTotalSupply": "1000",
                "reserve0": "5000",
                "reserve1": "5000",
                "reserveUSD": "10000",
                "token0PriceUSD": "1",
                "token1PriceUSD": "1"
            }],
            "liquidityMiningPositionSnapshots": [{
                "timestamp": "100",
                "pair": { "id": "0xpair" },
                "liquidityTokenBalance": "100"
            }]
        });

        let record: UserSnapshotsRecord = serde_json::from_value(value).unwrap();
        let events = record.into_events().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp(), 100);
        assert!(matches!(&events[1], RawSnapshotEvent::Mining(m) if m.liquidity_token_balance == dec!(100)));
    }

    #[test]
    fn test_user_snapshots_truncation() {
        let mining = |ts: u64| {
            json!({ "timestamp": ts, "pair": { "id": "0xpair" }, "liquidityTokenBalance": "1" })
        };
        let value = json!({
            "liquidityPositionSnapshots": [],
            "liquidityMiningPositionSnapshots": [mining(1), mining(2), mining(3)]
        });

        let record: UserSnapshotsRecord = serde_json::from_value(value).unwrap();

        assert!(record.is_truncated(3));
        assert!(!record.is_truncated(4));
        assert!(!UserSnapshotsRecord::default().is_truncated(1));
    }

    #[test]
    fn test_mint_burn_record_missing_amounts() {
        let value = json!({
            "timestamp": "1589747000",
            "amount0": "1000",
            "amount1": null,
            "amountUSD": null,
            "pair": { "token0": { "id": "0xa" }, "token1": { "id": "0xb" } }
        });

        let record: MintBurnRecord = serde_json::from_value(value).unwrap();
        let event = MintBurnEvent::try_from(record).unwrap();

        assert_eq!(event.amount0, dec!(1000));
        assert_eq!(event.amount1, Decimal::ZERO);
        assert_eq!(event.amount_usd, Decimal::ZERO);
        assert_eq!(event.timestamp, 1_589_747_000);
    }

    #[test]
    fn test_historical_pair_share_value() {
        let value = json!({
            "totalSupply": "1000",
            "reserve0": "5000",
            "reserve1": "5000",
            "reserveUSD": "10000",
            "token0": { "derivedNativeCurrency": "0.0005" },
            "token1": { "derivedNativeCurrency": "0.001" }
        });

        let record: HistoricalPairRecord = serde_json::from_value(value).unwrap();
        let share = record.into_share_value(86_400, dec!(2000)).unwrap();

        assert_eq!(share.timestamp, 86_400);
        assert_eq!(share.token0_price_usd, dec!(1));
        assert_eq!(share.token1_price_usd, dec!(2));
    }

    #[test]
    fn test_invalid_timestamp() {
        let raw = RawNumber::Text("soon".to_string());
        assert!(matches!(
            raw.to_timestamp("timestamp"),
            Err(DomainError::InvalidTimestamp { .. })
        ));
    }
}
