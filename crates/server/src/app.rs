//! Main application structure and lifecycle management

use crate::api::ApiServer;
use anyhow::{Context, Result};
use config::Config;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use types::RegionStatus;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Directory holding the override file
    pub base_dir: PathBuf,
    /// Live metrics per region id
    pub regions: RwLock<BTreeMap<String, RegionStatus>>,
}

/// Main application that coordinates all components
pub struct Application {
    state: Arc<AppState>,
    api_server: ApiServer,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: Config, base_dir: PathBuf) -> Result<Self> {
        info!("Initializing application components...");

        let state = Arc::new(AppState::new(config, base_dir));

        let api_server = ApiServer::new(state.clone())
            .context("Failed to create API server")?;

        info!("Application components initialized successfully");

        Ok(Self { state, api_server })
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting API server on {}:{}",
            self.state.config.api_server.host, self.state.config.api_server.port
        );

        self.api_server.run().await.context("API server error")
    }

    /// Shutdown the application gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down application...");

        self.api_server
            .shutdown()
            .await
            .context("Failed to shutdown API server")?;

        info!("Application shutdown complete");
        Ok(())
    }
}

impl AppState {
    /// Seed live region metrics from the configured regions
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let regions = config
            .regions
            .keys()
            .map(|id| (id.clone(), RegionStatus::default()))
            .collect();

        Self {
            config,
            base_dir,
            regions: RwLock::new(regions),
        }
    }

    /// Record metrics reported by a region, returning false for unknown regions
    pub async fn update_region(&self, region_id: &str, status: RegionStatus) -> bool {
        let mut regions = self.regions.write().await;
        match regions.get_mut(region_id) {
            Some(current) => {
                *current = status;
                true
            }
            None => false,
        }
    }
}
