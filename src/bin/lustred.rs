//! lustred: Lustre daemon.
//!
//! Serves the [`PricingGateway`](lustre::PricingGateway) over HTTP:
//! `GET /` renders the input form, `POST /predict` answers it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use lustre::server::config::Config;
use lustre::{Lustre, LustreError};

/// Lustre daemon: diamond price prediction over HTTP.
#[derive(Parser)]
#[command(name = "lustred")]
#[command(version = lustre::PKG_VERSION)]
#[command(about = "Lustre diamond price prediction daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to, overriding the config file.
    #[arg(short, long, env = "LUSTRED_BIND")]
    address: Option<String>,

    /// Scaler artifact, overriding the config file.
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Regressor artifact, overriding the config file.
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(scaler) = args.scaler {
        config.artifacts.scaler = scaler;
    }
    if let Some(model) = args.model {
        config.artifacts.model = model;
    }

    // Artifacts are loaded once; a bad artifact stops startup
    let gateway = Lustre::builder()
        .scaler_path(&config.artifacts.scaler)
        .regressor_path(&config.artifacts.model)
        .build()?;

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| LustreError::Configuration(format!("Invalid address: {e}")))?;

    info!(
        version = lustre::version_string(),
        %addr,
        scaler = gateway.scaler_name(),
        model = gateway.regressor_name(),
        "lustred starting"
    );

    let listener = TcpListener::bind(addr).await?;
    let app = lustre::server::router(Arc::new(gateway), &config.server.limits);
    lustre::server::serve(listener, app, shutdown_signal()).await?;

    info!("lustred stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
