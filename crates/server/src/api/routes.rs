//! API route definitions

use crate::api::{handlers, middleware::require_api_key};
use crate::app::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create the main API router
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Endpoints used by game servers and operators
    let private = Router::new()
        .route("/update_region", post(handlers::update_region))
        .route("/save_config", post(handlers::save_config))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/api/regions", get(handlers::list_regions))
        .nest("/private", private)
}
