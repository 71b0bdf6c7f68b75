use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use assetarc_core::prices::PriceQuote;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct PriceParams {
    currency: Option<String>,
}

/// Resolve the spot price for a registered asset.
///
/// A resolution failure is surfaced as 503, never as a zero price.
async fn get_price(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
    Query(params): Query<PriceParams>,
) -> ApiResult<Json<PriceQuote>> {
    if !state.registry.contains(&asset_id) {
        return Err(ApiError::UnknownAsset(asset_id));
    }

    let currency = params
        .currency
        .unwrap_or_else(|| state.default_currency.clone());
    let quote = state.resolver.resolve(&asset_id, &currency).await?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/prices/{asset_id}", get(get_price))
}
