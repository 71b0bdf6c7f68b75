//! Periodic cache refresh for a fixed asset set.
//!
//! One `run_cycle` per timer tick, independent of request traffic. The
//! cycle issues a single batched upstream request for the whole configured
//! set and writes each returned pair into the cache. There is no retry
//! within a cycle; the next scheduled tick is the retry mechanism.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};

use assetarc_market_data::SpotPriceProvider;

use super::cache::PriceCache;
use super::model::{PriceKey, PriceQuote};

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cycle ran; `written` pairs were stored.
    Completed { written: usize },
    /// Cache backend unreachable at the start of the cycle; nothing was
    /// fetched or written.
    SkippedCacheUnavailable,
    /// The batched upstream request failed; nothing was written.
    SkippedUpstream,
}

/// Proactively refreshes cached prices for a fixed asset/currency set.
pub struct PriceRefresher {
    provider: Arc<dyn SpotPriceProvider>,
    cache: Arc<dyn PriceCache>,
    asset_ids: Vec<String>,
    currencies: Vec<String>,
    cache_ttl: Duration,
}

impl PriceRefresher {
    pub fn new(
        provider: Arc<dyn SpotPriceProvider>,
        cache: Arc<dyn PriceCache>,
        asset_ids: Vec<String>,
        currencies: Vec<String>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            asset_ids,
            currencies,
            cache_ttl,
        }
    }

    /// Runs a single refresh cycle.
    ///
    /// Skips the entire cycle when the cache backend is unreachable at the
    /// start (no partial writes, no retry queue). Pairs absent from the
    /// upstream response are simply not written.
    pub async fn run_cycle(&self) -> RefreshOutcome {
        if self.asset_ids.is_empty() || self.currencies.is_empty() {
            debug!("refresh cycle skipped: no assets configured");
            return RefreshOutcome::Completed { written: 0 };
        }

        if let Err(e) = self.cache.ping().await {
            warn!("refresh cycle skipped, cache unavailable: {}", e);
            return RefreshOutcome::SkippedCacheUnavailable;
        }

        let spots = match self
            .provider
            .spot_prices(&self.asset_ids, &self.currencies)
            .await
        {
            Ok(spots) => spots,
            Err(e) if e.is_transient() => {
                warn!("refresh cycle skipped, upstream fetch failed: {}", e);
                return RefreshOutcome::SkippedUpstream;
            }
            Err(e) => {
                error!("refresh cycle skipped, upstream fetch failed: {}", e);
                return RefreshOutcome::SkippedUpstream;
            }
        };

        let mut written = 0;
        for spot in spots {
            let key = PriceKey::new(&spot.asset_id, &spot.currency);
            match self
                .cache
                .set(&key, PriceQuote::from(spot), self.cache_ttl)
                .await
            {
                Ok(()) => written += 1,
                Err(e) => warn!("refresh write failed for {}: {}", key, e),
            }
        }

        debug!("refresh cycle wrote {} prices", written);
        RefreshOutcome::Completed { written }
    }
}
