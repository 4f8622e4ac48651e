//! # linkgraph
//!
//! An in-memory directed graph of key/value nodes that can be mutated from
//! many threads, answers reachability queries, and round-trips through a
//! compact binary image.
//!
//! ## Core Principles
//!
//! - **Ids, not pointers**: nodes refer to each other by id through the graph's
//!   node table, so the two-way edge structure never forms ownership cycles
//! - **Both directions, always in step**: every edge is recorded on the node it
//!   leaves and on the node it enters, and the two records change together
//! - **Optional acyclicity**: a graph can refuse any edge that would close a cycle
//! - **Fail without side effects**: a failed call leaves the graph untouched
//!
//! ## Architecture
//!
//! ```text
//! Export (DOT, JSON, vis.js)        Storage (memory, RocksDB)
//!            ↓                                 ↓
//!   Node snapshots                  Encoding (bincode image)
//!            ↘                               ↙
//!        Graph (node table, relationships, traversal)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use linkgraph::Graph;
//!
//! # fn main() -> linkgraph::Result<()> {
//! // No duplicate keys, no cycles.
//! let graph = Graph::new("curriculum", false, false);
//! let algebra = graph.insert_data_node("Algebra", b"lesson 9".to_vec())?;
//! let quadratics = graph.insert_data_node("Quadratics", b"lesson 55".to_vec())?;
//!
//! graph.add_relationship(0, algebra.id())?;
//! graph.add_relationship(algebra.id(), quadratics.id())?;
//! assert!(graph.add_relationship(quadratics.id(), 0).is_err());
//!
//! assert!(graph.depth_first_search(0, quadratics.id())?);
//!
//! let restored = Graph::decode(&graph.encode()?)?;
//! assert!(restored.breadth_first_search(0, quadratics.id())?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
mod encoding;
pub mod error;
pub mod export;
pub mod graph;
pub mod storage;

// Re-export main types
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{Direction, Graph, Node, NodeId, NodeRef, NodeSnapshot, ROOT_ID};
#[cfg(feature = "rocksdb-backend")]
pub use storage::RocksDBBackend;
pub use storage::{MemoryBackend, StorageBackend};
