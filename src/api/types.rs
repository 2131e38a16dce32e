// API Type Definitions
//
// All serializable types used by API endpoints. Wire field names are
// camelCase to match the frontend contract.

use serde::{Deserialize, Serialize};

use crate::blockcypher::{RawTransaction, TxRecord, TxRecordInput, TxRecordOutput};

// ========== Address Types ==========

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AddressInfo {
    pub address: String,
    pub balance: i64,
    #[serde(rename = "totalReceived")]
    pub total_received: i64,
    #[serde(rename = "totalSent")]
    pub total_sent: i64,
    #[serde(rename = "txCount")]
    pub tx_count: u64,
    #[serde(rename = "unconfirmedBalance")]
    pub unconfirmed_balance: i64,
    pub transactions: Vec<RawTransaction>,
}

// ========== Transaction Types ==========

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TransactionDetails {
    pub hash: String,
    #[serde(rename = "blockHeight")]
    pub block_height: Option<i64>,
    #[serde(rename = "blockHash")]
    pub block_hash: Option<String>,
    pub received: Option<String>,
    pub confirmed: Option<String>,
    pub confirmations: u64,
    #[serde(rename = "doubleSpend")]
    pub double_spend: bool,
    pub total: i64,
    pub fees: i64,
    pub size: Option<u64>,
    pub preference: Option<String>,
    #[serde(rename = "relayedBy")]
    pub relayed_by: Option<String>,
    pub inputs: Vec<TxInputDetail>,
    pub outputs: Vec<TxOutputDetail>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TxInputDetail {
    #[serde(rename = "prevHash")]
    pub prev_hash: Option<String>,
    #[serde(rename = "outputIndex")]
    pub output_index: Option<i64>,
    #[serde(rename = "outputValue")]
    pub output_value: Option<i64>,
    pub sequence: Option<u64>,
    pub addresses: Vec<String>,
    #[serde(rename = "scriptType")]
    pub script_type: Option<String>,
    pub age: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TxOutputDetail {
    pub value: Option<i64>,
    pub script: Option<String>,
    pub addresses: Vec<String>,
    #[serde(rename = "scriptType")]
    pub script_type: Option<String>,
    #[serde(rename = "dataHex")]
    pub data_hex: Option<String>,
    #[serde(rename = "dataString")]
    pub data_string: Option<String>,
}

impl From<TxRecord> for TransactionDetails {
    fn from(record: TxRecord) -> Self {
        TransactionDetails {
            hash: record.hash,
            block_height: record.block_height,
            block_hash: record.block_hash,
            received: record.received,
            confirmed: record.confirmed,
            confirmations: record.confirmations,
            double_spend: record.double_spend,
            total: record.total,
            fees: record.fees,
            size: record.size,
            preference: record.preference,
            relayed_by: record.relayed_by,
            inputs: record.inputs.into_iter().map(Into::into).collect(),
            outputs: record.outputs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TxRecordInput> for TxInputDetail {
    fn from(input: TxRecordInput) -> Self {
        TxInputDetail {
            prev_hash: input.prev_hash,
            output_index: input.output_index,
            output_value: input.output_value,
            sequence: input.sequence,
            addresses: input.addresses,
            script_type: input.script_type,
            age: input.age,
        }
    }
}

impl From<TxRecordOutput> for TxOutputDetail {
    fn from(output: TxRecordOutput) -> Self {
        TxOutputDetail {
            value: output.value,
            script: output.script,
            addresses: output.addresses,
            script_type: output.script_type,
            data_hex: output.data_hex,
            data_string: output.data_string,
        }
    }
}

// ========== Error Types ==========

/// Flat error response body: `{"error": "<message>"}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_details_serializes_camel_case() {
        let record: TxRecord = serde_json::from_str(
            r#"{
                "hash": "cc33",
                "block_height": 170,
                "block_hash": "000000deadbeef",
                "confirmations": 12,
                "double_spend": false,
                "total": 1000,
                "fees": 10,
                "relayed_by": "127.0.0.1:8333",
                "inputs": [{"prev_hash": "dd44", "output_index": 1, "output_value": 500, "addresses": ["1abc"], "script_type": "pay-to-pubkey-hash"}],
                "outputs": [{"value": 990, "addresses": ["1def"], "data_hex": "6a"}]
            }"#,
        )
        .unwrap();

        let value = serde_json::to_value(TransactionDetails::from(record)).unwrap();
        assert_eq!(value["blockHeight"], 170);
        assert_eq!(value["blockHash"], "000000deadbeef");
        assert_eq!(value["doubleSpend"], false);
        assert_eq!(value["relayedBy"], "127.0.0.1:8333");
        assert_eq!(value["inputs"][0]["prevHash"], "dd44");
        assert_eq!(value["inputs"][0]["outputValue"], 500);
        assert_eq!(value["inputs"][0]["scriptType"], "pay-to-pubkey-hash");
        assert_eq!(value["outputs"][0]["dataHex"], "6a");
    }

    #[test]
    fn api_error_is_flat() {
        let body = serde_json::to_string(&ApiError::new("Transaction not found")).unwrap();
        assert_eq!(body, r#"{"error":"Transaction not found"}"#);
    }
}
