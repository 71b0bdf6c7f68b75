//! Price cache backend trait and the in-memory implementation.
//!
//! The trait models a backend that can fail (a remote store being
//! unreachable); callers must treat every error as a recoverable
//! condition and fall through to the live-fetch path. The in-process
//! implementation never fails.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;

use super::model::{CachedPrice, PriceKey, PriceQuote};

/// Errors from the cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage interface for cached spot prices.
///
/// Only per-key atomic set semantics are required; there is no
/// read-modify-write, so concurrent writers degrade to last-writer-wins
/// staleness rather than lost updates.
#[async_trait]
pub trait PriceCache: Send + Sync {
    /// Gets the cache entry for a key, absent entries included.
    ///
    /// Implementations may return expired entries; callers check the
    /// expiry deadline.
    async fn get(&self, key: &PriceKey) -> Result<Option<CachedPrice>, CacheError>;

    /// Stores a quote under a key with the given lifetime.
    async fn set(&self, key: &PriceKey, quote: PriceQuote, ttl: Duration)
        -> Result<(), CacheError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError>;
}

/// In-memory price cache with per-entry expiry deadlines.
#[derive(Debug, Default)]
pub struct MemoryPriceCache {
    entries: DashMap<PriceKey, CachedPrice>,
}

impl MemoryPriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired but not yet pruned) entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[async_trait]
impl PriceCache for MemoryPriceCache {
    async fn get(&self, key: &PriceKey) -> Result<Option<CachedPrice>, CacheError> {
        let now = Utc::now();
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(
        &self,
        key: &PriceKey,
        quote: PriceQuote,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.entries.insert(key.clone(), CachedPrice { quote, expires_at });
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
