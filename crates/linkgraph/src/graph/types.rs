//! Core graph types: node ids, nodes, snapshots and traversal direction.

use parking_lot::RwLock;
use std::sync::Arc;

/// Unique identifier for a node (monotonic counter, never reused).
pub type NodeId = u64;

/// Id of the root node every graph is created with.
pub const ROOT_ID: NodeId = 0;

/// Shared handle to a node owned by a [`Graph`](crate::Graph).
///
/// Handles stay valid after the node is deleted from its graph; they then
/// describe a detached node with empty edge lists.
pub type NodeRef = Arc<Node>;

/// Which edge list a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow destinations (edges leaving the node)
    Outgoing,
    /// Follow sources (edges arriving at the node)
    Incoming,
}

#[derive(Debug, Default)]
pub(crate) struct Payload {
    pub(crate) key: String,
    pub(crate) value: Vec<u8>,
}

/// The two edge lists of a node, guarded together.
///
/// `sources` is always the cardinality-matched inverse of every other node's
/// `destinations`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct EdgeLists {
    pub(crate) destinations: Vec<NodeId>,
    pub(crate) sources: Vec<NodeId>,
}

/// A vertex with a key/value payload and two ordered edge-id lists.
///
/// Nodes are only created by [`Graph::insert_node`](crate::Graph::insert_node)
/// and [`Graph::insert_data_node`](crate::Graph::insert_data_node). Edge lists
/// are mutated only through the graph, which holds its table guard while doing so.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    allow_circular: bool,
    payload: RwLock<Payload>,
    pub(crate) edges: RwLock<EdgeLists>,
}

impl Node {
    pub(crate) fn new(id: NodeId, allow_circular: bool) -> Self {
        Self {
            id,
            allow_circular,
            payload: RwLock::new(Payload::default()),
            edges: RwLock::new(EdgeLists::default()),
        }
    }

    pub(crate) fn with_data(
        id: NodeId,
        allow_circular: bool,
        key: String,
        value: Vec<u8>,
    ) -> Self {
        Self {
            id,
            allow_circular,
            payload: RwLock::new(Payload { key, value }),
            edges: RwLock::new(EdgeLists::default()),
        }
    }

    pub(crate) fn with_edges(mut self, edges: EdgeLists) -> Self {
        self.edges = RwLock::new(edges);
        self
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Circularity policy captured when the node was created.
    pub fn allow_circular(&self) -> bool {
        self.allow_circular
    }

    /// Copy of the node's key.
    pub fn key(&self) -> String {
        self.payload.read().key.clone()
    }

    /// Copy of the node's value.
    pub fn value(&self) -> Vec<u8> {
        self.payload.read().value.clone()
    }

    /// Replace the node's value.
    ///
    /// Values carry no policy, so unlike keys they can be changed through the
    /// handle directly. Use [`Graph::set_key`](crate::Graph::set_key) for keys.
    pub fn set_value(&self, value: impl Into<Vec<u8>>) {
        self.payload.write().value = value.into();
    }

    pub(crate) fn replace_key(&self, key: String) -> String {
        std::mem::replace(&mut self.payload.write().key, key)
    }

    /// Snapshot of the ids this node points to, in insertion order.
    pub fn list_destinations(&self) -> Vec<NodeId> {
        self.edges.read().destinations.clone()
    }

    /// Snapshot of the ids pointing to this node, in insertion order.
    pub fn list_sources(&self) -> Vec<NodeId> {
        self.edges.read().sources.clone()
    }

    /// Number of outgoing edges, counting parallel edges separately.
    pub fn out_degree(&self) -> usize {
        self.edges.read().destinations.len()
    }

    /// Number of incoming edges, counting parallel edges separately.
    pub fn in_degree(&self) -> usize {
        self.edges.read().sources.len()
    }

    /// Consistent copy of everything an exporter needs from this node.
    pub fn snapshot(&self) -> NodeSnapshot {
        let payload = self.payload.read();
        let edges = self.edges.read();
        NodeSnapshot {
            id: self.id,
            key: payload.key.clone(),
            value: payload.value.clone(),
            destinations: edges.destinations.clone(),
            sources: edges.sources.clone(),
        }
    }

    pub(crate) fn neighbors(&self, direction: Direction) -> Vec<NodeId> {
        match direction {
            Direction::Outgoing => self.list_destinations(),
            Direction::Incoming => self.list_sources(),
        }
    }
}

/// Owned, detached copy of a node's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Node id
    pub id: NodeId,
    /// Key at snapshot time
    pub key: String,
    /// Value at snapshot time
    pub value: Vec<u8>,
    /// Outgoing edge targets, in order
    pub destinations: Vec<NodeId>,
    /// Incoming edge origins, in order
    pub sources: Vec<NodeId>,
}
