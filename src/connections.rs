// Connection Graph Aggregation
//
// Builds the directed counterparty graph for a queried address out of the
// raw transactions returned by the upstream API. Pure and deterministic:
// the same transaction list always yields the same node and edge ordering,
// and aggregation itself never fails.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::blockcypher::RawTransaction;

/// Hard cap on the connections returned for one query. Edges are kept in
/// first-seen order, so truncation is deterministic.
pub const MAX_CONNECTIONS: usize = 50;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AddressNode {
    pub id: String,
    pub address: String,
    #[serde(rename = "isCenter")]
    pub is_center: bool,
}

/// Aggregated directed flow between two distinct addresses. `transactions`
/// keeps one hash per contributing leg, duplicates included.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub value: i64,
    pub transactions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionGraph {
    #[serde(rename = "centerAddress")]
    pub center_address: String,
    pub nodes: Vec<AddressNode>,
    pub connections: Vec<Connection>,
}

/// Single pass over `transactions` in the order given. Input legs become
/// counterparty -> center edges weighted by `output_value`; output legs
/// become center -> counterparty edges weighted by `value`. Legs without an
/// address list are skipped (non-standard scripts), and legs naming the
/// center itself contribute nothing, so no self-loop can exist.
///
/// A leg listing several addresses (historical multisig encodings) credits
/// the full leg value to each of them. The upstream data does not say how
/// the value splits, and dividing it here would change observable totals.
pub fn aggregate_connections(center: &str, transactions: &[RawTransaction]) -> ConnectionGraph {
    let mut nodes = vec![AddressNode {
        id: center.to_string(),
        address: center.to_string(),
        is_center: true,
    }];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(center.to_string());

    // First-seen edge order is the truncation order, so the map only holds
    // indexes into the ordered list.
    let mut connections: Vec<Connection> = Vec::new();
    let mut edge_index: HashMap<(String, String), usize> = HashMap::new();

    for tx in transactions {
        // Inputs: where money came from.
        for input in &tx.inputs {
            if let Some(addresses) = &input.addresses {
                for source in addresses {
                    if source == center {
                        continue;
                    }
                    if seen.insert(source.clone()) {
                        nodes.push(AddressNode {
                            id: source.clone(),
                            address: source.clone(),
                            is_center: false,
                        });
                    }
                    accumulate(
                        &mut connections,
                        &mut edge_index,
                        source,
                        center,
                        input.output_value.unwrap_or(0),
                        &tx.hash,
                    );
                }
            }
        }

        // Outputs: where money went to.
        for output in &tx.outputs {
            if let Some(addresses) = &output.addresses {
                for dest in addresses {
                    if dest == center {
                        continue;
                    }
                    if seen.insert(dest.clone()) {
                        nodes.push(AddressNode {
                            id: dest.clone(),
                            address: dest.clone(),
                            is_center: false,
                        });
                    }
                    accumulate(
                        &mut connections,
                        &mut edge_index,
                        center,
                        dest,
                        output.value.unwrap_or(0),
                        &tx.hash,
                    );
                }
            }
        }
    }

    // Drops whole edges past the cap; a surviving edge keeps its full
    // transaction list. The node list is never truncated.
    connections.truncate(MAX_CONNECTIONS);

    ConnectionGraph {
        center_address: center.to_string(),
        nodes,
        connections,
    }
}

fn accumulate(
    connections: &mut Vec<Connection>,
    edge_index: &mut HashMap<(String, String), usize>,
    from: &str,
    to: &str,
    value: i64,
    tx_hash: &str,
) {
    let key = (from.to_string(), to.to_string());
    let idx = match edge_index.get(&key) {
        Some(&idx) => idx,
        None => {
            let idx = connections.len();
            connections.push(Connection {
                from: key.0.clone(),
                to: key.1.clone(),
                value: 0,
                transactions: Vec::new(),
            });
            edge_index.insert(key, idx);
            idx
        }
    };

    connections[idx].value += value;
    connections[idx].transactions.push(tx_hash.to_string());
}
