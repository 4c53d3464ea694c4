//! HTTP middleware implementations

use crate::api::error::ApiError;
use crate::app::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use types::SurvevError;

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "survev-api-key";

/// Middleware to reject requests without the configured API key
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let expected = state.config.secrets.api_key.as_str();
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    // An unset key never authorizes anything
    let authorized = !expected.is_empty() && provided == Some(expected);
    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Rejected request with missing or invalid API key");
        return ApiError(SurvevError::Authentication("missing or invalid API key".to_string()))
            .into_response();
    }

    next.run(request).await
}
