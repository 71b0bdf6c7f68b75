//! Portfolio domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::prices::PriceQuote;

/// A configured holding: quantity owned plus what was paid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub asset_id: String,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub cost_currency: String,
}

impl Holding {
    /// Parses a configuration string of the form
    /// `asset:quantity:cost:currency,asset:quantity:cost:currency`.
    ///
    /// Empty segments are skipped, so a trailing comma is harmless.
    pub fn parse_list(spec: &str) -> Result<Vec<Holding>> {
        let mut holdings = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let parts: Vec<&str> = entry.split(':').collect();
            let [asset_id, quantity, cost_basis, cost_currency] = parts.as_slice() else {
                return Err(invalid_entry(entry));
            };
            let quantity: Decimal = quantity.trim().parse().map_err(|_| invalid_entry(entry))?;
            let cost_basis: Decimal =
                cost_basis.trim().parse().map_err(|_| invalid_entry(entry))?;
            if asset_id.is_empty() || cost_currency.is_empty() {
                return Err(invalid_entry(entry));
            }

            holdings.push(Holding {
                asset_id: asset_id.to_lowercase(),
                quantity,
                cost_basis,
                cost_currency: cost_currency.to_uppercase(),
            });
        }
        Ok(holdings)
    }
}

fn invalid_entry(entry: &str) -> Error {
    Error::InvalidConfigValue(format!(
        "holding entry '{}' is not of the form asset:quantity:cost:currency",
        entry
    ))
}

/// Valuation of a single holding in a display currency.
///
/// The price-derived fields are `None` when the price lookup failed; a
/// failed lookup never produces a zero value or gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub asset_id: String,
    pub currency: String,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub cost_basis: Decimal,
    pub cost_currency: String,
    pub gain_amount: Option<Decimal>,
    pub gain_pct: Option<Decimal>,
}

impl HoldingValuation {
    /// Values a holding against a resolved quote.
    ///
    /// Gain figures are only computed when the quote currency matches the
    /// currency the cost basis was recorded in.
    pub fn priced(holding: &Holding, quote: &PriceQuote) -> Self {
        let market_value = holding.quantity * quote.price;
        let comparable = holding.cost_currency.eq_ignore_ascii_case(&quote.currency);
        let gain_amount = comparable.then(|| market_value - holding.cost_basis);
        let gain_pct = gain_amount.and_then(|gain| {
            if holding.cost_basis.is_zero() {
                None
            } else {
                Some(gain / holding.cost_basis * Decimal::ONE_HUNDRED)
            }
        });

        Self {
            asset_id: holding.asset_id.clone(),
            currency: quote.currency.clone(),
            quantity: holding.quantity,
            price: Some(quote.price),
            market_value: Some(market_value),
            cost_basis: holding.cost_basis,
            cost_currency: holding.cost_currency.clone(),
            gain_amount,
            gain_pct,
        }
    }

    /// Marks a holding as unpriced after a failed lookup.
    pub fn unpriced(holding: &Holding, currency: &str) -> Self {
        Self {
            asset_id: holding.asset_id.clone(),
            currency: currency.to_uppercase(),
            quantity: holding.quantity,
            price: None,
            market_value: None,
            cost_basis: holding.cost_basis,
            cost_currency: holding.cost_currency.clone(),
            gain_amount: None,
            gain_pct: None,
        }
    }

    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }
}

/// Portfolio-level valuation summary.
///
/// Totals cover priced holdings only; `incomplete` flags that at least one
/// holding could not be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub currency: String,
    pub holdings: Vec<HoldingValuation>,
    pub total_value: Option<Decimal>,
    pub total_gain: Option<Decimal>,
    pub incomplete: bool,
}

impl PortfolioSummary {
    pub fn from_valuations(currency: &str, holdings: Vec<HoldingValuation>) -> Self {
        let priced: Vec<&HoldingValuation> =
            holdings.iter().filter(|h| h.is_priced()).collect();
        let incomplete = priced.len() < holdings.len();

        let total_value = if priced.is_empty() {
            None
        } else {
            Some(priced.iter().filter_map(|h| h.market_value).sum())
        };
        let gains: Vec<Decimal> = priced.iter().filter_map(|h| h.gain_amount).collect();
        let total_gain = if gains.is_empty() {
            None
        } else {
            Some(gains.iter().sum())
        };

        Self {
            currency: currency.to_uppercase(),
            holdings,
            total_value,
            total_gain,
            incomplete,
        }
    }
}
