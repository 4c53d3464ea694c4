//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use types::SurvevError;

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError(pub SurvevError);

impl From<SurvevError> for ApiError {
    fn from(err: SurvevError) -> Self {
        ApiError(err)
    }
}

impl From<types::ConfigError> for ApiError {
    fn from(err: types::ConfigError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            // Never tell the caller why authorization failed
            SurvevError::Authentication(_) => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            SurvevError::Config(_) | SurvevError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            SurvevError::Internal(ref reason) => {
                tracing::error!("Internal error: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
