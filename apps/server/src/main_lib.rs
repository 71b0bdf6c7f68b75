use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use assetarc_core::assets::AssetRegistry;
use assetarc_core::portfolio::PortfolioService;
use assetarc_core::prices::{MemoryPriceCache, PriceCache, PriceRefresher, PriceResolver};
use assetarc_market_data::{CoinGeckoProvider, SpotPriceProvider};

use crate::config::Config;

pub struct AppState {
    pub registry: Arc<AssetRegistry>,
    pub resolver: Arc<PriceResolver>,
    pub refresher: Arc<PriceRefresher>,
    pub portfolio_service: Arc<PortfolioService>,
    /// Direct provider handle for the uncached historical-series endpoint.
    pub provider: Arc<dyn SpotPriceProvider>,
    pub refresh_interval: std::time::Duration,
    pub default_currency: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("ASSETARC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn SpotPriceProvider> = Arc::new(CoinGeckoProvider::new());
    let cache: Arc<dyn PriceCache> = Arc::new(MemoryPriceCache::new());

    let resolver = Arc::new(PriceResolver::new(
        provider.clone(),
        cache.clone(),
        config.fallback_prices.clone(),
        config.cache_ttl,
    ));

    let refresher = Arc::new(PriceRefresher::new(
        provider.clone(),
        cache.clone(),
        config.watched_assets.clone(),
        config.currencies.clone(),
        config.cache_ttl,
    ));

    let registry = Arc::new(AssetRegistry::builtin());
    let portfolio_service = Arc::new(PortfolioService::new(
        resolver.clone(),
        config.holdings.clone(),
    ));

    Ok(Arc::new(AppState {
        registry,
        resolver,
        refresher,
        portfolio_service,
        provider,
        refresh_interval: config.refresh_interval,
        default_currency: config.default_currency().to_string(),
    }))
}
