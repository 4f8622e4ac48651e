//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Node`]: a key/value vertex with destination and source id lists
//! - [`Graph`]: the node table, id allocator and policies
//! - [`algorithms`]: reachability searches over the destination relation

mod types;
mod ids;
mod store;
mod relationship;
pub mod algorithms;

pub use types::{Direction, Node, NodeId, NodeRef, NodeSnapshot, ROOT_ID};
pub use store::Graph;

pub(crate) use ids::{invert, same_multiset};
pub(crate) use store::NodeTable;
pub(crate) use types::EdgeLists;
