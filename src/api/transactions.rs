// Transaction API Endpoints
//
// Transaction lookup against the upstream data source.

use axum::{extract::Path as AxumPath, Extension, Json};
use std::sync::Arc;

use crate::blockcypher::BlockCypherClient;
use super::helpers::{map_fetch_error, ApiResult};
use super::types::TransactionDetails;

/// GET /api/bitcoin/tx/{hash}
/// Returns full transaction details with inputs, outputs, and block context.
pub async fn tx_v1(
    AxumPath(hash): AxumPath<String>,
    Extension(client): Extension<Arc<BlockCypherClient>>,
) -> ApiResult<TransactionDetails> {
    let record = client.transaction(&hash).await.map_err(|e| {
        map_fetch_error(
            e,
            "Transaction not found",
            "Failed to fetch transaction details",
        )
    })?;

    Ok(Json(TransactionDetails::from(record)))
}
