//! API error handling.
//!
//! Maps domain failures onto HTTP responses. A price that cannot be
//! resolved surfaces as an explicit 503 with an error body, never as a
//! zero price in a 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use assetarc_core::prices::PriceError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Price(#[from] PriceError),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Price(PriceError::Unavailable { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            ApiError::UnknownAsset(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
