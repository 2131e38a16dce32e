// BTC Explorer
//
// HTTP backend for exploring Bitcoin addresses and transactions through the
// BlockCypher API, including the counterparty connection graph derived from
// an address's recent transactions.

mod api;
mod blockcypher;
mod config;
mod connections;
mod telemetry;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::cors::CorsLayer;

use crate::blockcypher::BlockCypherClient;
use crate::config::{get_global_config, init_global_config};
use crate::telemetry::{init_tracing, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(name = "btc-explorer", about = "Bitcoin address and transaction explorer API")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Listen address override, e.g. 0.0.0.0:3000
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(TelemetryConfig::default())?;

    // Load the configuration file
    init_global_config(&cli.config)?;
    let config = get_global_config();

    let listen = cli.listen.unwrap_or_else(|| {
        config
            .get::<String>("server.listen")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
    });
    let base_url = config
        .get::<String>("upstream.base_url")
        .unwrap_or_else(|_| "https://api.blockcypher.com/v1/btc/main".to_string());
    let timeout_secs = config.get::<u64>("upstream.timeout_secs").unwrap_or(10);

    let client = Arc::new(BlockCypherClient::new(
        base_url.clone(),
        Duration::from_secs(timeout_secs),
    )?);

    let app = Router::new()
        .route("/", get(api::root_handler))
        .route("/api/bitcoin/{address}", get(api::address_v1))
        .route(
            "/api/bitcoin/{address}/connections",
            get(api::address_connections_v1),
        )
        .route("/api/bitcoin/tx/{hash}", get(api::tx_v1))
        .layer(Extension(client))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!(address = %listen, upstream = %base_url, "btc-explorer listening");
    axum::serve(listener, app).await?;

    Ok(())
}
