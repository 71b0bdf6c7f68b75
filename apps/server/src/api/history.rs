use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use assetarc_market_data::PricePoint;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const DEFAULT_HISTORY_DAYS: u32 = 30;
const MAX_HISTORY_DAYS: u32 = 365;

#[derive(Deserialize)]
struct HistoryParams {
    currency: Option<String>,
    days: Option<u32>,
}

/// Fetch a historical price series for charting.
///
/// Uncached; an upstream failure is logged and rendered as an empty
/// series rather than an error.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<PricePoint>>> {
    if !state.registry.contains(&asset_id) {
        return Err(ApiError::UnknownAsset(asset_id));
    }

    let currency = params
        .currency
        .unwrap_or_else(|| state.default_currency.clone());
    let days = params
        .days
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .min(MAX_HISTORY_DAYS);

    match state
        .provider
        .historical_prices(&asset_id, &currency, days)
        .await
    {
        Ok(points) => Ok(Json(points)),
        Err(e) => {
            tracing::warn!("history fetch for {} failed: {}", asset_id, e);
            Ok(Json(Vec::new()))
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/history/{asset_id}", get(get_history))
}
