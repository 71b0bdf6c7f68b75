//! Market data domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provider identifier (e.g. "COINGECKO").
pub type ProviderId = String;

/// Upstream asset identifier (e.g. "bitcoin", "ethereum").
pub type AssetId = String;

/// Currency code (ISO 4217, e.g. "KES", "USD").
pub type Currency = String;

/// A spot price for one asset in one currency at a point in time.
///
/// Produced by the upstream fetch; transient and not persisted beyond the
/// caller's cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub asset_id: AssetId,
    pub currency: Currency,
    pub price: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl SpotPrice {
    pub fn new(
        asset_id: impl Into<AssetId>,
        currency: impl Into<Currency>,
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
}

/// One point of a historical price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}
