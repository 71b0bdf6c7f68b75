//! Tests for the resolver and refresher contracts.
//!
//! These exercise the read-through path with substitute collaborators:
//! a mock upstream provider with a call counter, and a mock cache that
//! can simulate an unreachable backend.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use assetarc_market_data::{MarketDataError, PricePoint, SpotPrice, SpotPriceProvider};

    use crate::prices::cache::{CacheError, PriceCache};
    use crate::prices::fallback::FallbackTable;
    use crate::prices::model::{CachedPrice, PriceKey, PriceQuote};
    use crate::prices::refresher::{PriceRefresher, RefreshOutcome};
    use crate::prices::resolver::{PriceError, PriceResolver};

    const TTL: Duration = Duration::from_secs(300);

    // =========================================================================
    // Mock SpotPriceProvider
    // =========================================================================

    #[derive(Default)]
    struct MockProvider {
        prices: Mutex<HashMap<(String, String), Decimal>>,
        fail: Mutex<bool>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new() -> Self {
            Self::default()
        }

        fn with_price(self, asset_id: &str, currency: &str, price: Decimal) -> Self {
            self.prices
                .lock()
                .unwrap()
                .insert((asset_id.to_string(), currency.to_uppercase()), price);
            self
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpotPriceProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn spot_price(
            &self,
            asset_id: &str,
            currency: &str,
        ) -> Result<SpotPrice, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail.lock().unwrap() {
                return Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "upstream down".to_string(),
                });
            }
            let prices = self.prices.lock().unwrap();
            prices
                .get(&(asset_id.to_lowercase(), currency.to_uppercase()))
                .map(|price| {
                    SpotPrice::new(
                        asset_id.to_lowercase(),
                        currency.to_uppercase(),
                        *price,
                        Utc::now(),
                    )
                })
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
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail.lock().unwrap() {
                return Err(MarketDataError::Timeout {
                    provider: "MOCK".to_string(),
                });
            }
            let prices = self.prices.lock().unwrap();
            let mut out = Vec::new();
            for asset_id in asset_ids {
                for currency in currencies {
                    if let Some(price) =
                        prices.get(&(asset_id.to_lowercase(), currency.to_uppercase()))
                    {
                        out.push(SpotPrice::new(
                            asset_id.to_lowercase(),
                            currency.to_uppercase(),
                            *price,
                            Utc::now(),
                        ));
                    }
                }
            }
            Ok(out)
        }

        async fn historical_prices(
            &self,
            _asset_id: &str,
            _currency: &str,
            _days: u32,
        ) -> Result<Vec<PricePoint>, MarketDataError> {
            Ok(Vec::new())
        }
    }

    // =========================================================================
    // Mock PriceCache
    // =========================================================================

    #[derive(Default)]
    struct MockCache {
        entries: Mutex<HashMap<PriceKey, CachedPrice>>,
        unavailable: Mutex<bool>,
        fail_on_set: Mutex<bool>,
        writes: AtomicUsize,
    }

    impl MockCache {
        fn new() -> Self {
            Self::default()
        }

        fn set_unavailable(&self, unavailable: bool) {
            *self.unavailable.lock().unwrap() = unavailable;
        }

        fn set_fail_on_set(&self, fail: bool) {
            *self.fail_on_set.lock().unwrap() = fail;
        }

        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Seeds an entry directly; a negative ttl produces an already
        /// expired entry.
        fn seed(&self, asset_id: &str, currency: &str, price: Decimal, ttl_secs: i64) {
            let key = PriceKey::new(asset_id, currency);
            let quote = PriceQuote::new(key.asset_id.clone(), key.currency.clone(), price, Utc::now());
            let entry = CachedPrice {
                quote,
                expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs),
            };
            self.entries.lock().unwrap().insert(key, entry);
        }

        fn entry(&self, asset_id: &str, currency: &str) -> Option<CachedPrice> {
            self.entries
                .lock()
                .unwrap()
                .get(&PriceKey::new(asset_id, currency))
                .cloned()
        }
    }

    #[async_trait]
    impl PriceCache for MockCache {
        async fn get(&self, key: &PriceKey) -> Result<Option<CachedPrice>, CacheError> {
            if *self.unavailable.lock().unwrap() {
                return Err(CacheError::Unavailable("mock cache down".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(
            &self,
            key: &PriceKey,
            quote: PriceQuote,
            ttl: Duration,
        ) -> Result<(), CacheError> {
            if *self.unavailable.lock().unwrap() || *self.fail_on_set.lock().unwrap() {
                return Err(CacheError::Unavailable("mock cache down".to_string()));
            }
            let entry = CachedPrice {
                quote,
                expires_at: Utc::now()
                    + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero()),
            };
            self.entries.lock().unwrap().insert(key.clone(), entry);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            if *self.unavailable.lock().unwrap() {
                return Err(CacheError::Unavailable("mock cache down".to_string()));
            }
            Ok(())
        }
    }

    fn resolver(
        provider: &Arc<MockProvider>,
        cache: &Arc<MockCache>,
        fallbacks: FallbackTable,
    ) -> PriceResolver {
        PriceResolver::new(provider.clone(), cache.clone(), fallbacks, TTL)
    }

    // =========================================================================
    // Resolver
    // =========================================================================

    #[tokio::test]
    async fn test_cache_hit_returns_value_without_network() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(12000000)));
        let cache = Arc::new(MockCache::new());
        cache.seed("bitcoin", "KES", dec!(13000000), 300);

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        let quote = resolver.resolve("bitcoin", "KES").await.unwrap();

        assert_eq!(quote.price, dec!(13000000));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_live_and_populates_cache() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13000000)));
        let cache = Arc::new(MockCache::new());

        let resolver = resolver(&provider, &cache, FallbackTable::default());

        let first = resolver.resolve("bitcoin", "KES").await.unwrap();
        assert_eq!(first.price, dec!(13000000));
        assert_eq!(provider.call_count(), 1);
        assert_eq!(cache.write_count(), 1);

        // Second call inside the expiry window is served from cache.
        let second = resolver.resolve("bitcoin", "KES").await.unwrap();
        assert_eq!(second.price, dec!(13000000));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_live_fetch() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13500000)));
        let cache = Arc::new(MockCache::new());
        cache.seed("bitcoin", "KES", dec!(13000000), -60);

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        let quote = resolver.resolve("bitcoin", "KES").await.unwrap();

        assert_eq!(quote.price, dec!(13500000));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_served_when_upstream_fails() {
        let provider = Arc::new(MockProvider::new());
        provider.set_fail(true);
        let cache = Arc::new(MockCache::new());
        let fallbacks = FallbackTable::from_spec("bitcoin:kes=12345678.5").unwrap();

        let resolver = resolver(&provider, &cache, fallbacks);
        let quote = resolver.resolve("bitcoin", "KES").await.unwrap();

        assert_eq!(quote.price, dec!(12345678.5));
        assert_eq!(quote.currency, "KES");
    }

    #[tokio::test]
    async fn test_unavailable_when_no_fallback() {
        let provider = Arc::new(MockProvider::new());
        provider.set_fail(true);
        let cache = Arc::new(MockCache::new());

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        let err = resolver.resolve("bitcoin", "KES").await.unwrap_err();

        // An explicit failure, never a zero or negative price.
        let PriceError::Unavailable { asset_id, currency } = err;
        assert_eq!(asset_id, "bitcoin");
        assert_eq!(currency, "KES");
    }

    #[tokio::test]
    async fn test_missing_pair_without_fallback_is_unavailable() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "USD", dec!(97000)));
        let cache = Arc::new(MockCache::new());

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        assert!(resolver.resolve("bitcoin", "KES").await.is_err());
    }

    #[tokio::test]
    async fn test_cache_down_degrades_to_live_fetch() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13000000)));
        let cache = Arc::new(MockCache::new());
        cache.set_unavailable(true);

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        let quote = resolver.resolve("bitcoin", "KES").await.unwrap();

        assert_eq!(quote.price, dec!(13000000));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_request() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13000000)));
        let cache = Arc::new(MockCache::new());
        cache.set_fail_on_set(true);

        let resolver = resolver(&provider, &cache, FallbackTable::default());
        let quote = resolver.resolve("bitcoin", "KES").await.unwrap();

        assert_eq!(quote.price, dec!(13000000));
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_bitcoin_kes_scenario() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13000000.0)));
        let cache = Arc::new(MockCache::new());

        let resolver = resolver(&provider, &cache, FallbackTable::default());

        let first = resolver.resolve("bitcoin", "KES").await.unwrap();
        assert_eq!(first.price, dec!(13000000.0));

        let second = resolver.resolve("bitcoin", "KES").await.unwrap();
        assert_eq!(second.price, dec!(13000000.0));
        assert_eq!(provider.call_count(), 1);
    }

    // =========================================================================
    // Refresher
    // =========================================================================

    fn refresher(
        provider: &Arc<MockProvider>,
        cache: &Arc<MockCache>,
        asset_ids: &[&str],
        currencies: &[&str],
    ) -> PriceRefresher {
        PriceRefresher::new(
            provider.clone(),
            cache.clone(),
            asset_ids.iter().map(|s| s.to_string()).collect(),
            currencies.iter().map(|s| s.to_string()).collect(),
            TTL,
        )
    }

    #[tokio::test]
    async fn test_refresh_cycle_writes_only_returned_pairs() {
        let provider = Arc::new(
            MockProvider::new()
                .with_price("bitcoin", "KES", dec!(13000000))
                .with_price("ethereum", "KES", dec!(450000)),
        );
        let cache = Arc::new(MockCache::new());

        let refresher = refresher(
            &provider,
            &cache,
            &["bitcoin", "ethereum", "solana"],
            &["KES"],
        );
        let outcome = refresher.run_cycle().await;

        assert_eq!(outcome, RefreshOutcome::Completed { written: 2 });
        assert_eq!(cache.write_count(), 2);
        assert!(cache.entry("bitcoin", "KES").is_some());
        assert!(cache.entry("ethereum", "KES").is_some());
        assert!(cache.entry("solana", "KES").is_none());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_refresh_cycle_skipped_when_cache_unavailable() {
        let provider = Arc::new(MockProvider::new().with_price("bitcoin", "KES", dec!(13000000)));
        let cache = Arc::new(MockCache::new());
        cache.set_unavailable(true);

        let refresher = refresher(&provider, &cache, &["bitcoin"], &["KES"]);
        let outcome = refresher.run_cycle().await;

        assert_eq!(outcome, RefreshOutcome::SkippedCacheUnavailable);
        // The upstream is never contacted when the cycle is skipped.
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_cycle_skipped_on_upstream_error() {
        let provider = Arc::new(MockProvider::new());
        provider.set_fail(true);
        let cache = Arc::new(MockCache::new());

        let refresher = refresher(&provider, &cache, &["bitcoin"], &["KES"]);
        let outcome = refresher.run_cycle().await;

        assert_eq!(outcome, RefreshOutcome::SkippedUpstream);
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_cycle_with_no_assets_is_a_no_op() {
        let provider = Arc::new(MockProvider::new());
        let cache = Arc::new(MockCache::new());

        let refresher = refresher(&provider, &cache, &[], &["KES"]);
        let outcome = refresher.run_cycle().await;

        assert_eq!(outcome, RefreshOutcome::Completed { written: 0 });
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_covers_multiple_currencies() {
        let provider = Arc::new(
            MockProvider::new()
                .with_price("bitcoin", "KES", dec!(13000000))
                .with_price("bitcoin", "USD", dec!(97000)),
        );
        let cache = Arc::new(MockCache::new());

        let refresher = refresher(&provider, &cache, &["bitcoin"], &["KES", "USD"]);
        let outcome = refresher.run_cycle().await;

        assert_eq!(outcome, RefreshOutcome::Completed { written: 2 });
        assert_eq!(
            cache.entry("bitcoin", "KES").unwrap().quote.price,
            dec!(13000000)
        );
        assert_eq!(
            cache.entry("bitcoin", "USD").unwrap().quote.price,
            dec!(97000)
        );
    }
}
