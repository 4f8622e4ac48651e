//! The [`Graph`] node table: allocation, insertion, deletion and lookup.

use super::ids::remove_all;
use super::types::{EdgeLists, Node, NodeId, NodeRef, ROOT_ID};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::storage::StorageBackend;
use log::{debug, info, trace};
use parking_lot::{RwLock, RwLockWriteGuard};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// State behind the graph's table guard.
#[derive(Debug, Default)]
pub(crate) struct NodeTable {
    pub(crate) nodes: BTreeMap<NodeId, NodeRef>,
    /// Keys in use; only maintained when duplicate keys are rejected
    pub(crate) keys: BTreeSet<String>,
    /// Id of the most recently allocated node
    pub(crate) last_id: NodeId,
}

impl NodeTable {
    pub(crate) fn get(&self, id: NodeId) -> Result<&NodeRef> {
        self.nodes.get(&id).ok_or_else(|| GraphError::not_found(id))
    }

    fn allocate(&mut self, allow_circular: bool, key: String, value: Vec<u8>) -> NodeRef {
        self.last_id += 1;
        let node = Arc::new(Node::with_data(self.last_id, allow_circular, key, value));
        self.nodes.insert(node.id(), Arc::clone(&node));
        node
    }

    /// Drop `key` from the used-key set unless a node other than `owner` still holds it.
    fn release_key(&mut self, owner: NodeId, key: &str) {
        let still_used = self
            .nodes
            .values()
            .any(|n| n.id() != owner && n.key() == key);
        if !still_used {
            self.keys.remove(key);
        }
    }
}

/// An in-memory directed graph of key/value nodes.
///
/// `Graph` is `Send + Sync`; share it between threads with an `Arc`. It holds
/// one guard over the node table and id allocator, and each node guards its
/// own edge lists. Every structural mutation takes the table guard for writing,
/// so edge changes are serialized and a cycle check and the insertion it
/// protects can never interleave with another writer.
///
/// A new graph always contains a root node with id 0.
#[derive(Debug)]
pub struct Graph {
    name: String,
    allow_duplicate_keys: bool,
    allow_circular: bool,
    pub(crate) table: RwLock<NodeTable>,
}

impl Graph {
    /// Create a graph with the given policies and a root node at id 0.
    pub fn new(name: impl Into<String>, allow_duplicate_keys: bool, allow_circular: bool) -> Self {
        let name = name.into();
        debug!(
            "Creating graph '{name}': duplicate_keys={allow_duplicate_keys}, circular={allow_circular}"
        );
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_ID, Arc::new(Node::new(ROOT_ID, allow_circular)));

        Self {
            name,
            allow_duplicate_keys,
            allow_circular,
            table: RwLock::new(NodeTable {
                nodes,
                keys: BTreeSet::new(),
                last_id: ROOT_ID,
            }),
        }
    }

    /// Create a graph that allows both duplicate keys and cycles.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(name, true, true)
    }

    /// Create a graph from a [`GraphConfig`].
    pub fn from_config(config: GraphConfig) -> Self {
        Self::new(
            config.name,
            config.allow_duplicate_keys,
            config.allow_circular,
        )
    }

    pub(crate) fn from_parts(
        name: String,
        allow_duplicate_keys: bool,
        allow_circular: bool,
        table: NodeTable,
    ) -> Self {
        Self {
            name,
            allow_duplicate_keys,
            allow_circular,
            table: RwLock::new(table),
        }
    }

    /// The graph's label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether several nodes may share a key.
    pub fn allows_duplicate_keys(&self) -> bool {
        self.allow_duplicate_keys
    }

    /// Whether edges closing a cycle are accepted on newly created nodes.
    pub fn allows_circular(&self) -> bool {
        self.allow_circular
    }

    /// The config this graph could be rebuilt from.
    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            name: self.name.clone(),
            allow_duplicate_keys: self.allow_duplicate_keys,
            allow_circular: self.allow_circular,
        }
    }

    /// The node created with the graph at id 0.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the root was deleted. Deleting
    /// the root is allowed.
    pub fn root(&self) -> Result<NodeRef> {
        self.table.read().get(ROOT_ID).cloned()
    }

    /// Number of nodes in the table.
    pub fn node_count(&self) -> usize {
        self.table.read().nodes.len()
    }

    /// Total number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.table
            .read()
            .nodes
            .values()
            .map(|n| n.out_degree())
            .sum()
    }

    /// Id of the most recently inserted node, or 0 if only the root was ever created.
    pub fn last_id(&self) -> NodeId {
        self.table.read().last_id
    }

    /// Insert an empty node and return a handle to it.
    ///
    /// The node starts with no edges, an empty key and value, and a copy of
    /// the graph's circularity policy.
    pub fn insert_node(&self) -> NodeRef {
        let node = self
            .table
            .write()
            .allocate(self.allow_circular, String::new(), Vec::new());
        debug!("Inserted node {} into '{}'", node.id(), self.name);
        node
    }

    /// Insert a node carrying `key` and `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::KeyExists`] if the graph rejects duplicate keys and
    /// `key` is already in use. Nothing is allocated in that case.
    pub fn insert_data_node(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<NodeRef> {
        let key = key.into();
        let mut table = self.table.write();

        if !self.allow_duplicate_keys {
            if table.keys.contains(&key) {
                debug!("Rejected duplicate key '{key}' in '{}'", self.name);
                return Err(GraphError::KeyExists { key });
            }
            table.keys.insert(key.clone());
        }

        let node = table.allocate(self.allow_circular, key, value.into());
        debug!("Inserted data node {} into '{}'", node.id(), self.name);
        Ok(node)
    }

    /// Change the key of an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `id` is absent, or
    /// [`GraphError::KeyExists`] if duplicate keys are rejected and another
    /// node already uses `key`.
    pub fn set_key(&self, id: NodeId, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        let mut table = self.table.write();
        let node = Arc::clone(table.get(id)?);
        let current = node.key();
        if current == key {
            return Ok(());
        }

        if !self.allow_duplicate_keys {
            if table.keys.contains(&key) {
                return Err(GraphError::KeyExists { key });
            }
            table.release_key(id, &current);
            table.keys.insert(key.clone());
        }

        trace!("Node {id} key '{current}' -> '{key}'");
        node.replace_key(key);
        Ok(())
    }

    /// Delete a node after severing every edge that touches it.
    ///
    /// The node and every node whose lists still mention it are locked
    /// together, in ascending id order, while edges are severed, so no reader
    /// sees a half-unlinked node.
    /// The root node can be deleted like any other.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `id` is absent.
    pub fn delete_node(&self, id: NodeId) -> Result<()> {
        debug!("Deleting node {id} from '{}'", self.name);
        let mut table = self.table.write();
        let target = Arc::clone(table.get(id)?);

        // The target's own lists can miss a referrer after a single-sided
        // remove_relationship, so every node is checked for `id`. Table order
        // is ascending id order, which is also the locking order.
        let involved: Vec<NodeRef> = table
            .nodes
            .values()
            .filter(|n| {
                if n.id() == id {
                    return true;
                }
                let edges = n.edges.read();
                edges.destinations.contains(&id) || edges.sources.contains(&id)
            })
            .cloned()
            .collect();

        {
            let mut guards: Vec<RwLockWriteGuard<'_, EdgeLists>> =
                involved.iter().map(|n| n.edges.write()).collect();
            for (node, edges) in involved.iter().zip(guards.iter_mut()) {
                if node.id() == id {
                    edges.destinations.clear();
                    edges.sources.clear();
                } else {
                    let severed =
                        remove_all(&mut edges.destinations, id) + remove_all(&mut edges.sources, id);
                    trace!("Severed {severed} edge(s) between {} and {id}", node.id());
                }
            }
        }

        table.nodes.remove(&id);
        if !self.allow_duplicate_keys {
            table.release_key(id, &target.key());
        }

        Ok(())
    }

    /// Ids of every node without incoming edges.
    ///
    /// The root qualifies only while nothing points at it; isolated nodes
    /// always qualify.
    pub fn find_roots(&self) -> BTreeSet<NodeId> {
        let table = self.table.read();
        table
            .nodes
            .values()
            .filter(|n| n.edges.read().sources.is_empty())
            .map(|n| n.id())
            .collect()
    }

    /// Id of the first node, in ascending id order, whose key equals `key`.
    pub fn find_node_id_by_key(&self, key: &str) -> Option<NodeId> {
        self.find_node_by_key(key).map(|n| n.id())
    }

    /// First node, in ascending id order, whose key equals `key`.
    ///
    /// This is a linear scan. Which of several nodes sharing a key is returned
    /// is only defined by table order.
    pub fn find_node_by_key(&self, key: &str) -> Option<NodeRef> {
        self.table
            .read()
            .nodes
            .values()
            .find(|n| n.key() == key)
            .cloned()
    }

    /// The node with the given id, if present.
    pub fn get_node(&self, id: NodeId) -> Option<NodeRef> {
        self.table.read().nodes.get(&id).cloned()
    }

    /// Whether a node with the given id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.table.read().nodes.contains_key(&id)
    }

    /// Handles to every node, in ascending id order.
    ///
    /// The returned list is a snapshot of the table; nodes inserted or deleted
    /// afterwards are not reflected.
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.table.read().nodes.values().cloned().collect()
    }

    /// Encode the graph and store the image under its name.
    ///
    /// Encoding finishes, and every guard is released, before the backend is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the backend write fails.
    pub fn save(&self, backend: &mut dyn StorageBackend) -> Result<()> {
        crate::storage::save_graph(self, backend)
    }

    /// Load the graph stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::GraphNotFound`] if nothing is stored under `name`
    /// and [`GraphError::CorruptData`] if the stored image does not decode.
    pub fn load(backend: &dyn StorageBackend, name: &str) -> Result<Self> {
        let graph = crate::storage::load_graph(backend, name)?;
        info!("Loaded graph '{name}' with {} nodes", graph.node_count());
        Ok(graph)
    }
}
