//! HTTP API request handlers

use crate::api::error::ApiError;
use crate::app::AppState;
use axum::{extract::State, response::Json};
use config::{ConfigLoader, PartialConfig};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use types::{RegionStatus, SurvevError};

/// Metrics pushed by a game server for its region
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionRequest {
    pub region_id: String,
    pub data: RegionStatus,
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// List configured regions with their live metrics
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<Value> {
    let live = state.regions.read().await;

    let regions: serde_json::Map<String, Value> = state
        .config
        .regions
        .iter()
        .map(|(id, region)| {
            let player_count = live.get(id).map(|s| s.player_count).unwrap_or_default();
            (
                id.clone(),
                json!({
                    "https": region.https,
                    "address": region.address,
                    "l10n": region.l10n,
                    "playerCount": player_count,
                }),
            )
        })
        .collect();

    Json(Value::Object(regions))
}

/// Record live metrics for a region (private endpoint)
pub async fn update_region(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRegionRequest>,
) -> Result<Json<Value>, ApiError> {
    if !state.update_region(&request.region_id, request.data).await {
        return Err(SurvevError::InvalidRequest(format!("Invalid region: {}", request.region_id)).into());
    }

    tracing::debug!(region = %request.region_id, "Region metrics updated");
    Ok(Json(json!({})))
}

/// Persist a partial configuration to the override file (private endpoint)
///
/// Takes effect on the next restart.
pub async fn save_config(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = PartialConfig::from_value(payload)?;

    let base_dir = state.base_dir.clone();
    tokio::task::spawn_blocking(move || ConfigLoader::save(base_dir, &patch))
        .await
        .map_err(|e| SurvevError::Internal(format!("config save task failed: {}", e)))?;

    Ok(Json(json!({})))
}
