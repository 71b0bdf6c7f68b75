//! Server configuration loaded from environment variables.

use std::time::Duration;

use anyhow::Context;

use assetarc_core::portfolio::Holding;
use assetarc_core::prices::{
    FallbackTable, DEFAULT_CACHE_TTL_SECS, DEFAULT_REFRESH_INTERVAL_SECS,
};

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub listen_addr: String,
    /// Display currencies, first entry is the default.
    pub currencies: Vec<String>,
    /// Asset ids refreshed by the background job.
    pub watched_assets: Vec<String>,
    /// Cache entry lifetime.
    pub cache_ttl: Duration,
    /// Interval between background refresh cycles.
    pub refresh_interval: Duration,
    /// Last-resort prices, empty unless configured.
    pub fallback_prices: FallbackTable,
    /// Configured holdings for portfolio valuation.
    pub holdings: Vec<Holding>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = env_or("ASSETARC_LISTEN_ADDR", "127.0.0.1:8080");

        let currencies = parse_csv(&env_or("ASSETARC_CURRENCIES", "KES,USD"));
        anyhow::ensure!(
            !currencies.is_empty(),
            "ASSETARC_CURRENCIES must name at least one currency"
        );

        let watched_assets = parse_csv(&env_or("ASSETARC_WATCHED_ASSETS", "bitcoin,ethereum"));

        let cache_ttl = Duration::from_secs(parse_secs(
            "ASSETARC_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);
        let refresh_interval = Duration::from_secs(parse_secs(
            "ASSETARC_REFRESH_INTERVAL_SECS",
            DEFAULT_REFRESH_INTERVAL_SECS,
        )?);

        let fallback_prices = FallbackTable::from_spec(&env_or("ASSETARC_FALLBACK_PRICES", ""))
            .context("invalid ASSETARC_FALLBACK_PRICES")?;
        let holdings = Holding::parse_list(&env_or("ASSETARC_HOLDINGS", ""))
            .context("invalid ASSETARC_HOLDINGS")?;

        Ok(Self {
            listen_addr,
            currencies,
            watched_assets,
            cache_ttl,
            refresh_interval,
            fallback_prices,
            holdings,
        })
    }

    /// The default display currency (first configured entry).
    pub fn default_currency(&self) -> &str {
        &self.currencies[0]
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_secs(key: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number of seconds", key)),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated list, trimming entries and skipping empty
/// segments. Case normalization happens at the price layer.
fn parse_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
