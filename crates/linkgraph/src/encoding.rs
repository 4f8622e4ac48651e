//! Binary image of a graph.
//!
//! The image is a stream of bincode records, in this order:
//!
//! ```text
//! name: String
//! allow_duplicate_keys: bool
//! allow_circular: bool
//! node_count: u64
//! node_count x NodeRecord { id, key, value, allow_circular, destinations, sources }
//! keys: sorted sequence of String
//! last_id: u64
//! ```
//!
//! Live source lists are never written. Each record's `sources` is derived from
//! the destination lists being written, and on decode the source relation is
//! recomputed from the decoded destinations. The persisted source lists must
//! agree with that recomputation or the image is rejected. When duplicate keys
//! are rejected, the used-key set must also agree with the node keys.

use crate::error::{GraphError, Result};
use crate::graph::{invert, same_multiset, EdgeLists, Graph, Node, NodeId, NodeTable};
use bincode::Options;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    key: String,
    value: Vec<u8>,
    allow_circular: bool,
    destinations: Vec<NodeId>,
    sources: Vec<NodeId>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

fn write<T: Serialize + ?Sized>(buf: &mut Vec<u8>, value: &T, what: &str) -> Result<()> {
    codec()
        .serialize_into(&mut *buf, value)
        .map_err(|e| GraphError::serialization(format!("Failed to encode {what}"), Some(e)))
}

fn invalid(message: impl Into<String>) -> GraphError {
    GraphError::corrupt(message, None::<bincode::Error>)
}

/// Under duplicate-key rejection the used-key set must match the node keys:
/// every non-empty key is recorded and held by one node only, and every
/// recorded key is held by some node. Nodes from `insert_node` share the empty
/// key without recording it.
fn check_used_keys(records: &BTreeMap<NodeId, NodeRecord>, keys: &BTreeSet<String>) -> Result<()> {
    let mut holders: BTreeMap<&str, NodeId> = BTreeMap::new();
    for record in records.values() {
        if record.key.is_empty() {
            continue;
        }
        if !keys.contains(&record.key) {
            return Err(invalid(format!(
                "Key '{}' of node {} is missing from the used-key set",
                record.key, record.id
            )));
        }
        if let Some(other) = holders.insert(&record.key, record.id) {
            return Err(invalid(format!(
                "Key '{}' held by nodes {other} and {}",
                record.key, record.id
            )));
        }
    }

    if let Some(orphan) = keys
        .iter()
        .find(|k| !k.is_empty() && !holders.contains_key(k.as_str()))
    {
        return Err(invalid(format!("Used key '{orphan}' is held by no node")));
    }
    if keys.contains("") && !records.values().any(|r| r.key.is_empty()) {
        return Err(invalid("Used key '' is held by no node"));
    }
    Ok(())
}

/// Reads consecutive records off the front of an image.
struct RecordReader<'a> {
    remaining: &'a [u8],
}

impl<'a> RecordReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes }
    }

    fn read<T: DeserializeOwned>(&mut self, what: &str) -> Result<T> {
        // Length prefixes can never claim more than what is left of the image.
        let limit = self.remaining.len() as u64;
        codec()
            .with_limit(limit)
            .deserialize_from(&mut self.remaining)
            .map_err(|e| GraphError::corrupt(format!("Failed to decode {what}"), Some(e)))
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Graph {
    /// Encode the graph into a self-contained image.
    ///
    /// Holds the table guard for reading while the buffer is built; no I/O
    /// happens here.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if a record cannot be encoded.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let table = self.table.read();

        let mut records: Vec<NodeRecord> = table
            .nodes
            .values()
            .map(|node| {
                let snapshot = node.snapshot();
                NodeRecord {
                    id: snapshot.id,
                    key: snapshot.key,
                    value: snapshot.value,
                    allow_circular: node.allow_circular(),
                    destinations: snapshot.destinations,
                    sources: Vec::new(),
                }
            })
            .collect();

        let mut inverse = invert(records.iter().map(|r| (r.id, r.destinations.as_slice())));
        for record in &mut records {
            record.sources = inverse.remove(&record.id).unwrap_or_default();
        }

        let mut buf = Vec::new();
        write(&mut buf, self.name(), "graph name")?;
        write(&mut buf, &self.allows_duplicate_keys(), "duplicate-key policy")?;
        write(&mut buf, &self.allows_circular(), "circularity policy")?;
        write(&mut buf, &(records.len() as u64), "node count")?;
        for record in &records {
            write(&mut buf, record, "node record")?;
        }
        write(&mut buf, &table.keys, "used keys")?;
        write(&mut buf, &table.last_id, "id allocator")?;

        debug!(
            "Encoded graph '{}': {} nodes, {} bytes",
            self.name(),
            records.len(),
            buf.len()
        );
        Ok(buf)
    }

    /// Rebuild a graph from an image produced by [`Graph::encode`].
    ///
    /// Destination lists come back exactly as written, including order and
    /// parallel edges. Source lists are recomputed as their inverse.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CorruptData`] if any record fails to parse, a node
    /// id repeats or exceeds the allocator, an edge points at a missing node,
    /// a persisted source list disagrees with the destination lists, or bytes
    /// remain after the last record. No partial graph is returned.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = RecordReader::new(bytes);

        let name: String = reader.read("graph name")?;
        let allow_duplicate_keys: bool = reader.read("duplicate-key policy")?;
        let allow_circular: bool = reader.read("circularity policy")?;
        let count: u64 = reader.read("node count")?;

        let mut records: BTreeMap<NodeId, NodeRecord> = BTreeMap::new();
        for _ in 0..count {
            let record: NodeRecord = reader.read("node record")?;
            if records.contains_key(&record.id) {
                return Err(invalid(format!("Duplicate node id {}", record.id)));
            }
            records.insert(record.id, record);
        }

        let keys: BTreeSet<String> = reader.read("used keys")?;
        let last_id: NodeId = reader.read("id allocator")?;
        if !reader.is_empty() {
            return Err(invalid(format!(
                "{} trailing bytes after id allocator",
                reader.remaining.len()
            )));
        }

        if let Some((&max_id, _)) = records.last_key_value() {
            if max_id > last_id {
                return Err(invalid(format!(
                    "Node id {max_id} exceeds id allocator {last_id}"
                )));
            }
        }

        for record in records.values() {
            if let Some(missing) = record
                .destinations
                .iter()
                .find(|&&id| !records.contains_key(&id))
            {
                return Err(invalid(format!(
                    "Node {} points at missing node {missing}",
                    record.id
                )));
            }
        }

        let mut inverse = invert(records.values().map(|r| (r.id, r.destinations.as_slice())));
        for record in records.values() {
            let derived = inverse.get(&record.id).map(Vec::as_slice).unwrap_or(&[]);
            if !same_multiset(&record.sources, derived) {
                return Err(invalid(format!(
                    "Source list of node {} does not match its incoming edges",
                    record.id
                )));
            }
        }

        if !allow_duplicate_keys {
            check_used_keys(&records, &keys)?;
        }

        let nodes: BTreeMap<NodeId, Arc<Node>> = records
            .into_iter()
            .map(|(id, record)| {
                let edges = EdgeLists {
                    destinations: record.destinations,
                    sources: inverse.remove(&id).unwrap_or_default(),
                };
                trace!("Decoded node {id}: {} out, {} in", edges.destinations.len(), edges.sources.len());
                let node = Node::with_data(id, record.allow_circular, record.key, record.value)
                    .with_edges(edges);
                (id, Arc::new(node))
            })
            .collect();

        debug!("Decoded graph '{name}': {} nodes", nodes.len());
        let table = NodeTable {
            nodes,
            keys,
            last_id,
        };
        Ok(Graph::from_parts(
            name,
            allow_duplicate_keys,
            allow_circular,
            table,
        ))
    }
}
