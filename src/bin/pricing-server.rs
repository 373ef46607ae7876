//! # Pricing Server Binary
//!
//! Loads a pricing schedule, validates it, and serves the pricing API.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use event_pricing::api::{AppState, create_router};
use event_pricing::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "pricing-server")]
#[command(about = "Event pricing and deposit API")]
struct Args {
    /// Directory holding the YAML schedule; the compiled-in schedule is used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let loader = match &args.config {
        Some(dir) => ConfigLoader::load(dir)?,
        None => {
            info!("No --config given, using the compiled-in schedule");
            ConfigLoader::standard()
        }
    };
    let business = loader.business();
    info!(
        code = %business.code,
        name = %business.name,
        version = %business.version,
        "Schedule ready"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(address = %listener.local_addr()?, "Pricing API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pricing API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
