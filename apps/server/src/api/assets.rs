use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use assetarc_core::assets::Asset;

use crate::{error::ApiResult, main_lib::AppState};

/// List the registered assets.
async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.registry.all().into_iter().cloned().collect();
    Ok(Json(assets))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/assets", get(list_assets))
}
