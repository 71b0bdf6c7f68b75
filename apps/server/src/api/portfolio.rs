use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use assetarc_core::portfolio::PortfolioSummary;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct PortfolioParams {
    currency: Option<String>,
}

/// Value the configured holdings in the requested display currency.
///
/// Holdings whose price could not be resolved come back with absent
/// price fields and the summary is flagged incomplete.
async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PortfolioParams>,
) -> ApiResult<Json<PortfolioSummary>> {
    let currency = params
        .currency
        .unwrap_or_else(|| state.default_currency.clone());
    let summary = state.portfolio_service.valuations(&currency).await;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio", get(get_portfolio))
}
