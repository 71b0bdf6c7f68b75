//! Asset registry.
//!
//! A static mapping from asset identifier to display metadata, built once
//! at startup and immutable for the process lifetime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Classification of registered assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetKind {
    /// Cryptocurrency with a live upstream price source.
    Crypto,
    /// Equity placeholder with no live price source wired up.
    Stock,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Crypto => "CRYPTO",
            AssetKind::Stock => "STOCK",
        }
    }
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Upstream identifier (e.g. "bitcoin") or ticker for stocks.
    pub id: String,
    /// Display ticker symbol (e.g. "BTC").
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    pub kind: AssetKind,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        kind: AssetKind,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Immutable registry of known assets, keyed by asset id.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, Asset>,
}

impl AssetRegistry {
    /// Build a registry from an explicit asset list.
    ///
    /// Later entries with a duplicate id overwrite earlier ones.
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    /// The built-in asset set served by default deployments.
    pub fn builtin() -> Self {
        Self::from_assets(vec![
            Asset::new("bitcoin", "BTC", "Bitcoin", AssetKind::Crypto),
            Asset::new("ethereum", "ETH", "Ethereum", AssetKind::Crypto),
            Asset::new("AAPL", "AAPL", "Apple", AssetKind::Stock),
            Asset::new("NVDA", "NVDA", "NVIDIA", AssetKind::Stock),
        ])
    }

    pub fn get(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.get(asset_id)
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.assets.contains_key(asset_id)
    }

    /// All registered assets, ordered by symbol for stable listings.
    pub fn all(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.assets.values().collect();
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
