//! Adding and removing edges.
//!
//! An edge `from -> to` lives in two places: `to` in `from`'s destinations and
//! `from` in `to`'s sources. Both entries are written while holding the table
//! write guard and both node guards, taken in ascending id order.

use super::algorithms::{self, Order};
use super::ids::remove_all;
use super::types::{EdgeLists, Node, NodeId};
use super::Graph;
use crate::error::{GraphError, Result};
use log::debug;
use parking_lot::RwLockWriteGuard;

/// Write-lock the edge lists of two distinct nodes, lower id first.
///
/// Guards are returned in argument order.
fn lock_pair<'a>(
    a: &'a Node,
    b: &'a Node,
) -> (
    RwLockWriteGuard<'a, EdgeLists>,
    RwLockWriteGuard<'a, EdgeLists>,
) {
    debug_assert_ne!(a.id(), b.id());
    if a.id() < b.id() {
        let first = a.edges.write();
        let second = b.edges.write();
        (first, second)
    } else {
        let first = b.edges.write();
        let second = a.edges.write();
        (second, first)
    }
}

impl Graph {
    /// Add an edge `from -> to`.
    ///
    /// Parallel edges are allowed: adding the same pair twice appends twice.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if either id is absent.
    /// - [`GraphError::Circular`] if `from` was created under a no-cycles policy
    ///   and `to` already reaches `from` (or `from == to`). Neither node changes.
    pub fn add_relationship(&self, from: NodeId, to: NodeId) -> Result<()> {
        let table = self.table.write();
        let from_node = table.get(from)?;
        let to_node = table.get(to)?;

        if !from_node.allow_circular()
            && (from == to || algorithms::reaches(&table, to, from, Order::DepthFirst))
        {
            debug!("Rejected circular relationship {from} -> {to}");
            return Err(GraphError::Circular { from, to });
        }

        if from == to {
            let mut edges = from_node.edges.write();
            edges.destinations.push(to);
            edges.sources.push(from);
        } else {
            let (mut from_edges, mut to_edges) = lock_pair(from_node, to_node);
            from_edges.destinations.push(to);
            to_edges.sources.push(from);
        }

        debug!("Added relationship {from} -> {to}");
        Ok(())
    }

    /// Remove every occurrence of `other` from `node`'s sources and destinations.
    ///
    /// Only `node`'s own lists change; `other` keeps its entries for `node`. Call
    /// it from both sides, or use [`Graph::unlink`], to drop the edges entirely.
    /// Succeeds when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is absent.
    pub fn remove_relationship(&self, node: NodeId, other: NodeId) -> Result<()> {
        let table = self.table.write();
        let target = table.get(node)?;

        let mut edges = target.edges.write();
        let removed = remove_all(&mut edges.destinations, other) + remove_all(&mut edges.sources, other);
        debug!("Removed {removed} reference(s) to {other} from node {node}");
        Ok(())
    }

    /// Drop every edge between `a` and `b`, in both directions and on both nodes.
    ///
    /// Equivalent to `remove_relationship(a, b)` followed by
    /// `remove_relationship(b, a)`, performed as one step.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either id is absent.
    pub fn unlink(&self, a: NodeId, b: NodeId) -> Result<()> {
        let table = self.table.write();
        let a_node = table.get(a)?;
        let b_node = table.get(b)?;

        let removed = if a == b {
            let mut edges = a_node.edges.write();
            remove_all(&mut edges.destinations, a) + remove_all(&mut edges.sources, a)
        } else {
            let (mut a_edges, mut b_edges) = lock_pair(a_node, b_node);
            remove_all(&mut a_edges.destinations, b)
                + remove_all(&mut a_edges.sources, b)
                + remove_all(&mut b_edges.destinations, a)
                + remove_all(&mut b_edges.sources, a)
        };

        debug!("Unlinked {a} and {b} ({removed} entries)");
        Ok(())
    }
}
