//! Price acquisition and caching.
//!
//! This module provides the core types and services for spot price
//! resolution:
//!
//! - [`model`] - Domain models for price quotes and cache entries
//! - [`cache`] - Cache backend trait and the in-memory implementation
//! - [`fallback`] - Statically configured last-resort prices
//! - [`resolver`] - Read-through price resolution
//! - [`refresher`] - Periodic cache refresh for a fixed asset set
//! - [`constants`] - Configuration constants
//!
//! # Architecture
//!
//! ```text
//! PriceResolver ──► PriceCache (get/set)
//!       │
//!       └────────► SpotPriceProvider (market-data crate)
//!
//! PriceRefresher ─► SpotPriceProvider (batched)
//!       │
//!       └────────► PriceCache (set per returned pair)
//! ```
//!
//! The resolver prefers a fresh cache entry, falls back to a live fetch,
//! and only then to a configured fallback price. The refresher writes the
//! same keyspace on a timer; both writers rely solely on the cache's
//! atomic per-key set, so last-writer-wins staleness is accepted.

pub mod cache;
pub mod constants;
pub mod fallback;
pub mod model;
pub mod refresher;
pub mod resolver;

#[cfg(test)]
mod service_tests;

// Re-export commonly used types for convenience
pub use cache::{CacheError, MemoryPriceCache, PriceCache};
pub use fallback::FallbackTable;
pub use model::{CachedPrice, PriceKey, PriceQuote};
pub use refresher::{PriceRefresher, RefreshOutcome};
pub use resolver::{PriceError, PriceResolver};

// Re-export constants
pub use constants::*;
