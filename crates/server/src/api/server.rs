//! HTTP API server implementation

use crate::api::routes;
use crate::app::AppState;
use anyhow::{Context, Result};
use axum::{http::Method, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP API server
pub struct ApiServer {
    app: Router,
    addr: SocketAddr,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: Arc<AppState>) -> Result<Self> {
        let config = &state.config;

        // Parse server address
        let addr: SocketAddr = format!("{}:{}", config.api_server.host, config.api_server.port)
            .parse()
            .context("Invalid apiServer host/port configuration")?;

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);

        // Build the router
        let app = routes::create_routes(state.clone())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(cors)
            .with_state(state);

        info!("API server configured for {}", addr);

        Ok(Self { app, addr })
    }

    /// Run the API server
    pub async fn run(&mut self) -> Result<()> {
        let listener = TcpListener::bind(self.addr)
            .await
            .context("Failed to bind to server address")?;

        info!("API server listening on {}", self.addr);

        axum::serve(listener, self.app.clone())
            .await
            .context("API server error")?;

        Ok(())
    }

    /// Shutdown the API server
    pub async fn shutdown(&mut self) -> Result<()> {
        // The server stops when its task is dropped
        info!("API server shutdown initiated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ConfigLoader;
    use std::path::PathBuf;
    use types::Environment;

    #[test]
    fn test_invalid_listen_address() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ apiServer: { host: 'not an ip' } }",
        )
        .unwrap();
        let state = Arc::new(AppState::new(config, PathBuf::from(".")));
        assert!(ApiServer::new(state).is_err());
    }

    #[test]
    fn test_listen_address_from_config() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ apiServer: { host: '127.0.0.1', port: 8100 } }",
        )
        .unwrap();
        let state = Arc::new(AppState::new(config, PathBuf::from(".")));
        let server = ApiServer::new(state).unwrap();
        assert_eq!(server.addr, "127.0.0.1:8100".parse::<SocketAddr>().unwrap());
    }
}
