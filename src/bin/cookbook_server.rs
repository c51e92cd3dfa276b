//! Cookbook HTTP Server
//!
//! A standalone server binary exposing the cookbook over HTTP/JSON.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;

use cookbook::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};
use cookbook::transport;
use cookbook::Cookbook;

/// Server command-line arguments
#[derive(Debug, Parser)]
#[command(name = "cookbook-server")]
#[command(version, about = "Recipe registry and resolver over HTTP", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "COOKBOOK_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "COOKBOOK_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Largest accepted request body in bytes
    #[arg(long, env = "COOKBOOK_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig::default()
            .with_addr(SocketAddr::new(args.host, args.port))
            .with_max_body_bytes(args.max_body_bytes)
    }
}

/// Resolves once `signal` fires. If the signal cannot be installed, never
/// resolves, so the server keeps running until the process is killed.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn shutdown_signal() {
    shutdown_on(signal::ctrl_c()).await;
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Args::parse());
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        max_body_bytes = config.max_body_bytes,
        "starting cookbook server"
    );

    let cookbook = Arc::new(Cookbook::in_memory());
    let addr = config.addr;
    transport::serve(cookbook, config, shutdown_signal())
        .await
        .with_context(|| format!("serving on {addr}"))?;

    tracing::info!("shut down");
    Ok(())
}
