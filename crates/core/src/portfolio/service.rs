//! Portfolio valuation service.

use std::sync::Arc;

use log::warn;

use super::model::{Holding, HoldingValuation, PortfolioSummary};
use crate::prices::PriceResolver;

/// Values configured holdings against resolved spot prices.
pub struct PortfolioService {
    resolver: Arc<PriceResolver>,
    holdings: Vec<Holding>,
}

impl PortfolioService {
    pub fn new(resolver: Arc<PriceResolver>, holdings: Vec<Holding>) -> Self {
        Self { resolver, holdings }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Values every configured holding in the given display currency.
    ///
    /// A holding whose price cannot be resolved is reported unpriced; the
    /// failure never turns into a zero price or a fabricated gain figure.
    pub async fn valuations(&self, currency: &str) -> PortfolioSummary {
        let mut valuations = Vec::with_capacity(self.holdings.len());
        for holding in &self.holdings {
            match self.resolver.resolve(&holding.asset_id, currency).await {
                Ok(quote) => valuations.push(HoldingValuation::priced(holding, &quote)),
                Err(e) => {
                    warn!("valuation for {} skipped: {}", holding.asset_id, e);
                    valuations.push(HoldingValuation::unpriced(holding, currency));
                }
            }
        }
        PortfolioSummary::from_valuations(currency, valuations)
    }
}
