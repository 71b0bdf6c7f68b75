//! Spot price provider trait definitions.
//!
//! This module defines the `SpotPriceProvider` trait that all upstream
//! price sources implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{PricePoint, SpotPrice};

pub mod coingecko;

/// Trait for upstream spot-price sources.
///
/// Implement this trait to add support for a new price API. The domain
/// layer only ever sees this trait, which keeps it testable with
/// substitute implementations.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the current spot price for a single asset/currency pair.
    ///
    /// # Returns
    ///
    /// The spot price on success. Fails with
    /// [`MarketDataError::PriceNotFound`] when the upstream response does
    /// not carry the requested pair.
    async fn spot_price(
        &self,
        asset_id: &str,
        currency: &str,
    ) -> Result<SpotPrice, MarketDataError>;

    /// Fetch spot prices for several assets and currencies in one upstream
    /// request.
    ///
    /// Pairs absent from the upstream response are omitted from the result
    /// rather than treated as errors; callers decide what absence means.
    async fn spot_prices(
        &self,
        asset_ids: &[String],
        currencies: &[String],
    ) -> Result<Vec<SpotPrice>, MarketDataError>;

    /// Fetch a historical price series for an asset.
    ///
    /// # Arguments
    ///
    /// * `asset_id` - The upstream asset identifier
    /// * `currency` - The target currency
    /// * `days` - Number of days of history to fetch
    ///
    /// # Returns
    ///
    /// Points ordered by timestamp ascending.
    async fn historical_prices(
        &self,
        asset_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError>;
}
