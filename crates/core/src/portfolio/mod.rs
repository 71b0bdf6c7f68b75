//! Portfolio valuation.
//!
//! Holdings times resolved spot price versus stored purchase cost. A
//! holding whose price resolution failed is reported with explicit absent
//! fields; gain figures are never derived from a failed lookup.

pub mod model;
pub mod service;

pub use model::{Holding, HoldingValuation, PortfolioSummary};
pub use service::PortfolioService;
