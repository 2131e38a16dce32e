// Address API Endpoints
//
// Proxies BlockCypher address data and derives the counterparty connection
// graph for a queried address. No caching: every request is an independent
// upstream fetch plus one aggregation pass.

use axum::{extract::Path as AxumPath, Extension};
use axum::Json;
use std::sync::Arc;

use crate::blockcypher::BlockCypherClient;
use crate::config::get_global_config;
use crate::connections::{aggregate_connections, ConnectionGraph};
use super::helpers::{map_fetch_error, ApiResult};
use super::types::AddressInfo;

/// Summary endpoint lists at most this many recent transactions.
const RECENT_TX_LIMIT: usize = 10;
/// Transaction page bound for the balance summary fetch.
const SUMMARY_TX_LIMIT: u32 = 50;

/// GET /api/bitcoin/{address}
/// Returns the address balance summary plus up to 10 recent transactions.
pub async fn address_v1(
    AxumPath(address): AxumPath<String>,
    Extension(client): Extension<Arc<BlockCypherClient>>,
) -> ApiResult<AddressInfo> {
    let summary = client
        .address_summary(&address, SUMMARY_TX_LIMIT)
        .await
        .map_err(|e| {
            map_fetch_error(
                e,
                "Address not found or has no transactions",
                "Failed to fetch Bitcoin address data",
            )
        })?;

    // The recent-transaction fetch is best effort: a failure degrades to an
    // empty list rather than failing the whole request.
    let mut transactions = match client
        .address_with_transactions(&address, RECENT_TX_LIMIT as u32)
        .await
    {
        Ok(txs) => txs,
        Err(err) => {
            tracing::warn!(%address, error = %err, "recent transaction fetch failed");
            Vec::new()
        }
    };
    transactions.truncate(RECENT_TX_LIMIT);

    Ok(Json(AddressInfo {
        address: summary.address.unwrap_or(address),
        balance: summary.balance,
        total_received: summary.total_received,
        total_sent: summary.total_sent,
        tx_count: summary.n_tx,
        unconfirmed_balance: summary.unconfirmed_balance,
        transactions,
    }))
}

/// GET /api/bitcoin/{address}/connections
/// Returns the aggregated money-flow graph between the address and its
/// counterparties, derived from recent transactions. At most 50 connections.
pub async fn address_connections_v1(
    AxumPath(address): AxumPath<String>,
    Extension(client): Extension<Arc<BlockCypherClient>>,
) -> ApiResult<ConnectionGraph> {
    let config = get_global_config();
    let tx_limit = config
        .get::<u32>("upstream.connections_tx_limit")
        .unwrap_or(20);

    let transactions = client
        .address_with_transactions(&address, tx_limit)
        .await
        .map_err(|e| {
            map_fetch_error(
                e,
                "Address not found or has no transactions",
                "Failed to fetch Bitcoin address connections",
            )
        })?;

    let graph = aggregate_connections(&address, &transactions);
    tracing::debug!(
        %address,
        transactions = transactions.len(),
        nodes = graph.nodes.len(),
        connections = graph.connections.len(),
        "aggregated connection graph"
    );

    Ok(Json(graph))
}
