//! Statically configured fallback prices.
//!
//! Used only when both the cache and the live upstream fail. Empty by
//! default; deployments opt in via configuration rather than constants in
//! source.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::model::PriceKey;
use crate::errors::{Error, Result};

/// Last-resort prices keyed by asset/currency pair.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    prices: HashMap<PriceKey, Decimal>,
}

impl FallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PriceKey, price: Decimal) {
        self.prices.insert(key, price);
    }

    pub fn get(&self, key: &PriceKey) -> Option<Decimal> {
        self.prices.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Parses a configuration string of the form
    /// `asset:currency=price,asset:currency=price`.
    ///
    /// Empty segments are skipped, so a trailing comma is harmless.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut table = Self::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (pair, price) = entry
                .split_once('=')
                .ok_or_else(|| invalid_entry(entry))?;
            let (asset_id, currency) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| invalid_entry(entry))?;
            if asset_id.is_empty() || currency.is_empty() {
                return Err(invalid_entry(entry));
            }
            let price: Decimal = price
                .trim()
                .parse()
                .map_err(|_| invalid_entry(entry))?;

            table.insert(PriceKey::new(asset_id, currency), price);
        }
        Ok(table)
    }
}

fn invalid_entry(entry: &str) -> Error {
    Error::InvalidConfigValue(format!(
        "fallback price entry '{}' is not of the form asset:currency=price",
        entry
    ))
}
