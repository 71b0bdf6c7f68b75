//! Read-through price resolution.
//!
//! The resolver prefers a fresh cache entry, falls back to a single live
//! upstream fetch, and only then to a statically configured fallback
//! price. Cache backend failures never surface past this module; they
//! only change which code path services the request.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use thiserror::Error;

use assetarc_market_data::SpotPriceProvider;

use super::cache::PriceCache;
use super::fallback::FallbackTable;
use super::model::{PriceKey, PriceQuote};

/// Errors surfaced by the resolver.
///
/// `Unavailable` is the only public failure: no cached, live, or fallback
/// value could be produced. The presentation layer must render it as an
/// explicit price-unavailable state, never as a zero price.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("No price available for {asset_id} in {currency}")]
    Unavailable { asset_id: String, currency: String },
}

/// Read-through spot price resolver.
///
/// Constructed once at process start with injected dependencies and
/// shared by reference with request handlers and the scheduled refresh
/// task.
pub struct PriceResolver {
    provider: Arc<dyn SpotPriceProvider>,
    cache: Arc<dyn PriceCache>,
    fallbacks: FallbackTable,
    cache_ttl: Duration,
}

impl PriceResolver {
    pub fn new(
        provider: Arc<dyn SpotPriceProvider>,
        cache: Arc<dyn PriceCache>,
        fallbacks: FallbackTable,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            fallbacks,
            cache_ttl,
        }
    }

    /// Resolves the spot price for an asset/currency pair.
    ///
    /// 1. A fresh cache entry is returned immediately; no network call is
    ///    made on a hit. A cache backend error counts as a miss.
    /// 2. On a miss, one live upstream fetch. The fresh quote is written
    ///    back to the cache; a write failure is logged and ignored.
    /// 3. On fetch failure, the configured fallback price for the pair if
    ///    one exists, otherwise [`PriceError::Unavailable`].
    pub async fn resolve(&self, asset_id: &str, currency: &str) -> Result<PriceQuote, PriceError> {
        let key = PriceKey::new(asset_id, currency);

        match self.cache.get(&key).await {
            Ok(Some(cached)) if !cached.is_expired(Utc::now()) => {
                debug!("cache hit for {}", key);
                return Ok(cached.quote);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("price cache unavailable for {}, trying live fetch: {}", key, e);
            }
        }

        match self
            .provider
            .spot_price(&key.asset_id, &key.currency)
            .await
        {
            Ok(spot) => {
                let quote = PriceQuote::from(spot);
                if let Err(e) = self.cache.set(&key, quote.clone(), self.cache_ttl).await {
                    warn!("price cache write failed for {}: {}", key, e);
                }
                Ok(quote)
            }
            Err(err) => match self.fallbacks.get(&key) {
                Some(price) => {
                    warn!(
                        "upstream fetch failed for {} ({}), serving configured fallback",
                        key, err
                    );
                    Ok(PriceQuote::new(
                        key.asset_id.clone(),
                        key.currency.clone(),
                        price,
                        Utc::now(),
                    ))
                }
                None => {
                    warn!("upstream fetch failed for {}: {}", key, err);
                    Err(PriceError::Unavailable {
                        asset_id: key.asset_id,
                        currency: key.currency,
                    })
                }
            },
        }
    }
}
