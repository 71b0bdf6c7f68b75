//! HTTP API routing.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

mod assets;
mod health;
mod history;
mod portfolio;
mod prices;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(assets::router())
        .merge(health::router())
        .merge(history::router())
        .merge(portfolio::router())
        .merge(prices::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
