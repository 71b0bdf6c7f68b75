//! CoinGecko provider for cryptocurrency spot prices.
//!
//! Fetches spot prices via `/simple/price` and historical series via
//! `/coins/{id}/market_chart`. The free tier needs no API key.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{PricePoint, SpotPrice};
use crate::provider::SpotPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Public API base URL
const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from `/simple/price`: asset id -> currency -> price.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Response from `/coins/{id}/market_chart`.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs, ordered ascending
    prices: Vec<(f64, f64)>,
}

/// CoinGecko provider for cryptocurrency market data.
///
/// # Example
///
/// ```ignore
/// use assetarc_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new();
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a new CoinGecko provider against the public API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Create a provider against a custom base URL (mirror or proxy).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    fn request_error(err: reqwest::Error) -> MarketDataError {
        if err.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(err)
        }
    }

    fn status_error(status: StatusCode) -> MarketDataError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            }
        }
    }

    /// Flatten a `/simple/price` response into spot prices.
    ///
    /// Pairs absent from the response are omitted. Prices that cannot be
    /// represented as a decimal are dropped with a log line rather than
    /// failing the whole batch.
    fn collect_spot_prices(
        parsed: &SimplePriceResponse,
        asset_ids: &[String],
        currencies: &[String],
        observed_at: DateTime<Utc>,
    ) -> Vec<SpotPrice> {
        let mut out = Vec::new();
        for asset_id in asset_ids {
            let Some(rates) = parsed.get(&asset_id.to_lowercase()) else {
                continue;
            };
            for currency in currencies {
                let Some(raw) = rates.get(&currency.to_lowercase()) else {
                    continue;
                };
                match Decimal::try_from(*raw) {
                    Ok(price) => out.push(SpotPrice::new(
                        asset_id.to_lowercase(),
                        currency.to_uppercase(),
                        price,
                        observed_at,
                    )),
                    Err(_) => {
                        log::warn!(
                            "discarding unrepresentable price {} for {}/{}",
                            raw,
                            asset_id,
                            currency
                        );
                    }
                }
            }
        }
        out
    }

    fn chart_points(response: MarketChartResponse) -> Vec<PricePoint> {
        response
            .prices
            .into_iter()
            .filter_map(|(ts_ms, raw)| {
                let timestamp = DateTime::from_timestamp_millis(ts_ms as i64)?;
                let price = Decimal::try_from(raw).ok()?;
                Some(PricePoint { timestamp, price })
            })
            .collect()
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotPriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn spot_price(
        &self,
        asset_id: &str,
        currency: &str,
    ) -> Result<SpotPrice, MarketDataError> {
        let prices = self
            .spot_prices(&[asset_id.to_string()], &[currency.to_string()])
            .await?;

        prices
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::PriceNotFound {
                asset_id: asset_id.to_string(),
                currency: currency.to_string(),
            })
    }

    async fn spot_prices(
        &self,
        asset_ids: &[String],
        currencies: &[String],
    ) -> Result<Vec<SpotPrice>, MarketDataError> {
        if asset_ids.is_empty() || currencies.is_empty() {
            return Ok(Vec::new());
        }

        let ids = asset_ids
            .iter()
            .map(|id| id.to_lowercase())
            .collect::<Vec<_>>()
            .join(",");
        let vs_currencies = currencies
            .iter()
            .map(|c| c.to_lowercase())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, ids, vs_currencies
        );

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        let parsed: SimplePriceResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self::collect_spot_prices(
            &parsed,
            asset_ids,
            currencies,
            Utc::now(),
        ))
    }

    async fn historical_prices(
        &self,
        asset_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            asset_id.to_lowercase(),
            currency.to_lowercase(),
            days
        );

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        let parsed: MarketChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self::chart_points(parsed))
    }
}
