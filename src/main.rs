//! Ethereum node gateway.
//!
//! ```text
//!   Client ──HTTP──▶ http (axum handlers) ──▶ BlockchainService
//!                                                 │
//!                                                 ▼
//!                                     EthereumClient (alloy) ──JSON-RPC──▶ Node
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use eth_gateway::lifecycle::{resolve_config, Overrides, Shutdown};
use eth_gateway::observability::{logging, metrics};
use eth_gateway::{EthereumClient, HttpServer, SharedService};

#[derive(Parser)]
#[command(name = "eth-gateway")]
#[command(about = "HTTP API in front of an Ethereum JSON-RPC node", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node JSON-RPC URL, overrides the config file.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Listen address, overrides the config file.
    #[arg(long)]
    bind: Option<String>,

    /// Log level, overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(
        args.config.as_deref(),
        Overrides {
            rpc_url: args.rpc_url,
            bind_address: args.bind,
            log_level: args.log_level,
        },
    )?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "eth-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.node.rpc_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let client = EthereumClient::new(config.node.clone())?;
    client.probe_chain().await;
    let service: SharedService = Arc::new(client);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, service);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
