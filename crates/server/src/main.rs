//! Survev API server - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use config::ConfigLoader;
use std::{env, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::Environment;

mod api;
mod app;

use app::Application;

/// Survev API server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Run with production defaults (multi-process, rate limits, no debug tools)
    #[arg(long)]
    production: bool,

    /// Directory holding the override config file
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    let environment = Environment::from_production(cli.production);
    info!("Starting Survev server v{} ({})", env!("CARGO_PKG_VERSION"), environment);

    // Resolve configuration
    let config = ConfigLoader::resolve(environment, &cli.dir)
        .context("Failed to load configuration")?;

    let enabled_modes: Vec<String> = config
        .modes
        .iter()
        .filter(|m| m.enabled)
        .map(|m| format!("{}/{}", m.map_name, m.team_mode.team_size()))
        .collect();
    info!("Enabled modes: {}", enabled_modes.join(", "));
    info!("OAuth redirect URI: {}", config.oauth_redirect_uri);

    let mut app = Application::new(config, cli.dir).context("Failed to create application")?;

    // Setup signal handling
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    info!("Application starting...");
    tokio::select! {
        result = app.run() => {
            if let Err(e) = result {
                tracing::error!("Application error: {:#}", e);
                return Err(e);
            }
        }
        _ = shutdown_signal => {
            info!("Initiating graceful shutdown...");
            app.shutdown().await?;
        }
    }

    info!("Survev server shutdown complete");
    Ok(())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", log_level);
    info!("Log format: {}", log_format);

    Ok(())
}
