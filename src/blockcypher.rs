// BlockCypher Upstream Client
//
// Typed client for the BlockCypher REST API (free tier, no API key).
// Third-party JSON is mapped to explicit structs right here at the boundary,
// with optional-field defaults applied once, so the rest of the crate never
// carries loosely-typed data.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy for upstream fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream returned 404: the address or transaction has no on-chain data.
    #[error("not found upstream")]
    NotFound,
    /// Any other non-success status, transport failure, or unparseable body.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Upstream(err.to_string())
    }
}

// ========== Boundary Types ==========

/// One transaction as returned inside the `txs` array of
/// `/addrs/{address}/full`. Field names match the upstream schema and are
/// re-emitted as-is on the address endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawTransaction {
    #[serde(default)]
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<i64>,
    // Absent for some upstream records; treated as empty sequences.
    #[serde(default)]
    pub inputs: Vec<TxInput>,
    #[serde(default)]
    pub outputs: Vec<TxOutput>,
}

/// An input leg. `addresses` is absent for non-standard scripts and
/// `output_value` may be missing; both degrade gracefully in aggregation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TxInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_value: Option<i64>,
}

/// An output leg, same optionality rules as [`TxInput`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TxOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// Balance summary from `/addrs/{address}`. All counters default to 0 when
/// the upstream omits them.
#[derive(Deserialize, Debug, Clone)]
pub struct AddressSummary {
    pub address: Option<String>,
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub total_received: i64,
    #[serde(default)]
    pub total_sent: i64,
    #[serde(default)]
    pub n_tx: u64,
    #[serde(default)]
    pub unconfirmed_balance: i64,
}

/// Full transaction record from `/txs/{hash}`.
#[derive(Deserialize, Debug, Clone)]
pub struct TxRecord {
    #[serde(default)]
    pub hash: String,
    pub block_height: Option<i64>,
    pub block_hash: Option<String>,
    pub received: Option<String>,
    pub confirmed: Option<String>,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default)]
    pub double_spend: bool,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub fees: i64,
    pub size: Option<u64>,
    pub preference: Option<String>,
    pub relayed_by: Option<String>,
    #[serde(default)]
    pub inputs: Vec<TxRecordInput>,
    #[serde(default)]
    pub outputs: Vec<TxRecordOutput>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TxRecordInput {
    pub prev_hash: Option<String>,
    pub output_index: Option<i64>,
    pub output_value: Option<i64>,
    pub sequence: Option<u64>,
    #[serde(default)]
    pub addresses: Vec<String>,
    pub script_type: Option<String>,
    pub age: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TxRecordOutput {
    pub value: Option<i64>,
    pub script: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
    pub script_type: Option<String>,
    pub data_hex: Option<String>,
    pub data_string: Option<String>,
}

/// Envelope for `/addrs/{address}/full`. Only the `txs` array is consumed;
/// an absent array means the address has no transactions.
#[derive(Deserialize, Debug)]
struct FullAddress {
    #[serde(default)]
    txs: Vec<RawTransaction>,
}

// ========== Client ==========

pub struct BlockCypherClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlockCypherClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("BTC-Explorer/1.0")
            .build()?;

        Ok(BlockCypherClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch up to `limit` detailed transactions (with inputs and outputs)
    /// for an address. An address that exists but has no transactions yields
    /// an empty list, not an error.
    pub async fn address_with_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<RawTransaction>, FetchError> {
        let url = format!("{}/addrs/{}/full?limit={}", self.base_url, address, limit);
        let full: FullAddress = self.get_json(&url).await?;
        Ok(full.txs)
    }

    /// Fetch the balance summary for an address.
    pub async fn address_summary(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<AddressSummary, FetchError> {
        let url = format!("{}/addrs/{}?limit={}", self.base_url, address, limit);
        self.get_json(&url).await
    }

    /// Fetch one transaction by hash.
    pub async fn transaction(&self, hash: &str) -> Result<TxRecord, FetchError> {
        let url = format!("{}/txs/{}", self.base_url, hash);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "fetching from BlockCypher");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            status if !status.is_success() => Err(FetchError::Upstream(format!(
                "API request failed: {}",
                status
            ))),
            _ => response
                .json::<T>()
                .await
                .map_err(|e| FetchError::Upstream(format!("invalid upstream body: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address_parses_with_sparse_fields() {
        // Shapes seen in the wild: missing inputs, missing addresses on a
        // leg, missing values, null addresses for coinbase inputs.
        let body = r#"{
            "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "txs": [
                {
                    "hash": "aa11",
                    "outputs": [
                        {"value": 5000000000, "addresses": ["1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"]},
                        {"value": 0}
                    ]
                },
                {
                    "hash": "bb22",
                    "inputs": [
                        {"addresses": null, "output_value": 100},
                        {"addresses": ["1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"]}
                    ],
                    "outputs": []
                }
            ]
        }"#;

        let full: FullAddress = serde_json::from_str(body).unwrap();
        assert_eq!(full.txs.len(), 2);
        assert_eq!(full.txs[0].hash, "aa11");
        assert!(full.txs[0].inputs.is_empty());
        assert_eq!(full.txs[0].outputs[1].addresses, None);
        assert_eq!(full.txs[1].inputs[0].addresses, None);
        assert_eq!(full.txs[1].inputs[1].output_value, None);
    }

    #[test]
    fn full_address_without_txs_is_empty() {
        let full: FullAddress = serde_json::from_str(r#"{"address": "1abc"}"#).unwrap();
        assert!(full.txs.is_empty());
    }

    #[test]
    fn address_summary_defaults_missing_counters() {
        let summary: AddressSummary =
            serde_json::from_str(r#"{"address": "1abc", "balance": 42}"#).unwrap();
        assert_eq!(summary.address.as_deref(), Some("1abc"));
        assert_eq!(summary.balance, 42);
        assert_eq!(summary.total_received, 0);
        assert_eq!(summary.total_sent, 0);
        assert_eq!(summary.n_tx, 0);
        assert_eq!(summary.unconfirmed_balance, 0);
    }

    #[test]
    fn raw_transaction_reemits_summary_fields() {
        // The address endpoint passes these records through to the frontend,
        // which renders confirmations alongside totals and fees.
        let tx: RawTransaction = serde_json::from_str(
            r#"{"hash": "aa11", "confirmations": 6, "total": 100, "fees": 2, "confirmed": "2009-01-09T02:54:25Z"}"#,
        )
        .unwrap();
        assert_eq!(tx.confirmations, Some(6));

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["hash"], "aa11");
        assert_eq!(value["confirmations"], 6);
        assert_eq!(value["total"], 100);
        assert_eq!(value["fees"], 2);
        assert_eq!(value["confirmed"], "2009-01-09T02:54:25Z");
    }

    #[test]
    fn tx_record_parses_minimal_payload() {
        let record: TxRecord = serde_json::from_str(
            r#"{
                "hash": "cc33",
                "total": 1000,
                "inputs": [{"prev_hash": "dd44", "output_index": 0, "addresses": ["1abc"]}],
                "outputs": [{"value": 900, "addresses": ["1def"], "script_type": "pay-to-pubkey-hash"}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.hash, "cc33");
        assert_eq!(record.block_height, None);
        assert_eq!(record.confirmations, 0);
        assert!(!record.double_spend);
        assert_eq!(record.inputs[0].addresses, vec!["1abc"]);
        assert_eq!(record.outputs[0].value, Some(900));
    }

    #[tokio::test]
    #[ignore] // Ignore by default to avoid hitting API in CI
    async fn live_address_fetch_returns_transactions() {
        let client = BlockCypherClient::new(
            "https://api.blockcypher.com/v1/btc/main",
            Duration::from_secs(10),
        )
        .unwrap();

        // Genesis coinbase address, guaranteed to exist.
        let txs = client
            .address_with_transactions("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 5)
            .await
            .unwrap();
        assert!(!txs.is_empty());
    }
}
