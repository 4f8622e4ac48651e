//! JSON format export for D3.js and web visualization tools.
//!
//! Generates JSON with "nodes" and "links" arrays compatible with D3.js force-directed layouts.

use crate::{Graph, GraphError, NodeSnapshot, Result};
use serde_json::{json, Value};

/// Export graph to D3.js-compatible JSON format.
///
/// Values are rendered as UTF-8 text, lossily. Each destination entry becomes
/// one link, so parallel edges appear more than once.
pub fn export_json(graph: &Graph) -> Result<String> {
    let nodes: Vec<NodeSnapshot> = graph.nodes().iter().map(|n| n.snapshot()).collect();

    let nodes_array: Vec<Value> = nodes.iter().map(node_to_json).collect();
    let links_array: Vec<Value> = nodes
        .iter()
        .flat_map(|n| {
            n.destinations
                .iter()
                .map(move |dest| json!({ "source": n.id, "target": dest }))
        })
        .collect();

    let result = json!({
        "name": graph.name(),
        "nodes": nodes_array,
        "links": links_array,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize JSON export", Some(e)))
}

/// Convert node to JSON object
fn node_to_json(node: &NodeSnapshot) -> Value {
    json!({
        "id": node.id,
        "key": node.key,
        "value": String::from_utf8_lossy(&node.value),
    })
}
