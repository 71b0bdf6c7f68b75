//! AssetArc Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for AssetArc: the price
//! resolver and its cache, the background refresher, the asset registry,
//! and portfolio valuation. It is transport-agnostic; the HTTP surface
//! lives in the server app and the upstream API client in the
//! `market-data` crate.

pub mod assets;
pub mod errors;
pub mod portfolio;
pub mod prices;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
