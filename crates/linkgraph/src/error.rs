//! Error types for linkgraph operations.
//!
//! All fallible operations return [`Result<T>`]. A failed call leaves the graph
//! exactly as it was before the call.

use crate::graph::NodeId;
use thiserror::Error;

/// Result type alias for linkgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A data node was inserted with a key already in use while the graph
    /// rejects duplicate keys.
    #[error("Key exists: '{key}'")]
    KeyExists {
        /// The colliding key
        key: String,
    },

    /// Adding the edge would close a cycle on a node that forbids them.
    #[error("Circular relationship: {from} -> {to} would close a cycle")]
    Circular {
        /// Origin of the rejected edge
        from: NodeId,
        /// Target of the rejected edge
        to: NodeId,
    },

    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// ID of the missing node
        node_id: NodeId,
    },

    /// No stored image exists under the requested graph name.
    #[error("Graph not found in storage: '{name}'")]
    GraphNotFound {
        /// Name that was looked up
        name: String,
    },

    /// An encoded graph image could not be reconstructed.
    #[error("Corrupt data: {message}")]
    CorruptData {
        /// What failed to decode
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization error outside the graph image (config, export payloads)
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend error (RocksDB, file I/O, etc.)
    #[error("Storage error: {message}")]
    Storage {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create a corrupt-data error from a message and optional source.
    pub fn corrupt<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CorruptData {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a storage error from a message and optional source.
    pub fn storage<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    pub(crate) fn not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }
}
