//! Price domain models.

use std::fmt;

use assetarc_market_data::SpotPrice;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cache key for a spot price.
///
/// Keyed by the asset/currency pair so that the same asset quoted in
/// several currencies never pollutes another currency's entry. The asset
/// id is normalized to lowercase and the currency to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceKey {
    pub asset_id: String,
    pub currency: String,
}

impl PriceKey {
    pub fn new(asset_id: impl AsRef<str>, currency: impl AsRef<str>) -> Self {
        Self {
            asset_id: asset_id.as_ref().to_lowercase(),
            currency: currency.as_ref().to_uppercase(),
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.asset_id, self.currency)
    }
}

/// A resolved spot price for one asset in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub asset_id: String,
    pub currency: String,
    pub price: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(
        asset_id: impl Into<String>,
        currency: impl Into<String>,
        price: Decimal,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            currency: currency.into(),
            price,
            observed_at,
        }
    }

    pub fn key(&self) -> PriceKey {
        PriceKey::new(&self.asset_id, &self.currency)
    }
}

impl From<SpotPrice> for PriceQuote {
    fn from(spot: SpotPrice) -> Self {
        Self {
            asset_id: spot.asset_id,
            currency: spot.currency,
            price: spot.price,
            observed_at: spot.observed_at,
        }
    }
}

/// A cache entry: the last known quote plus its expiry deadline.
///
/// Overwritten on every successful refresh. No invariant enforces
/// monotonic timestamps between writers; last writer wins.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPrice {
    pub quote: PriceQuote,
    pub expires_at: DateTime<Utc>,
}

impl CachedPrice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
