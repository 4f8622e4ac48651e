//! Reachability traversals.
//!
//! Both searches are iterative with an explicit frontier and a visited set, so
//! they run in O(nodes + edges), terminate on cyclic graphs and do not grow the
//! call stack on long chains.

use super::store::NodeTable;
use super::types::{Direction, NodeId};
use super::Graph;
use crate::error::Result;
use log::trace;
use std::collections::{HashSet, VecDeque};

/// Frontier discipline for [`reaches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    DepthFirst,
    BreadthFirst,
}

/// Whether `target` can be reached from `start` over at least one destination edge.
///
/// `start` itself is only reached through a cycle or self-loop. Ids missing from
/// the table are skipped.
pub(crate) fn reaches(table: &NodeTable, start: NodeId, target: NodeId, order: Order) -> bool {
    let Some(start_node) = table.nodes.get(&start) else {
        return false;
    };

    let mut frontier: VecDeque<NodeId> = start_node.list_destinations().into();
    let mut visited = HashSet::new();

    while let Some(current) = match order {
        Order::DepthFirst => frontier.pop_back(),
        Order::BreadthFirst => frontier.pop_front(),
    } {
        if current == target {
            trace!("{order:?} {start} -> {target}: found after {} visits", visited.len());
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(node) = table.nodes.get(&current) {
            frontier.extend(node.list_destinations());
        }
    }

    trace!("{order:?} {start} -> {target}: exhausted {} nodes", visited.len());
    false
}

/// Every node reachable from `start` in `direction`, in breadth-first discovery order.
pub(crate) fn reachable(table: &NodeTable, start: NodeId, direction: Direction) -> Vec<NodeId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        let Some(node) = table.nodes.get(&current) else {
            continue;
        };
        for neighbor in node.neighbors(direction) {
            if visited.insert(neighbor) {
                result.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    result
}

/// Depth-first reachability from `start` to `target` over destination edges.
///
/// Returns `true` only if a path of at least one edge exists; a node reaches
/// itself only through a cycle.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound) if
/// either id is absent.
pub fn depth_first_search(graph: &Graph, start: NodeId, target: NodeId) -> Result<bool> {
    search(graph, start, target, Order::DepthFirst)
}

/// Breadth-first variant of [`depth_first_search`] with the same answers.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound) if
/// either id is absent.
pub fn breadth_first_search(graph: &Graph, start: NodeId, target: NodeId) -> Result<bool> {
    search(graph, start, target, Order::BreadthFirst)
}

fn search(graph: &Graph, start: NodeId, target: NodeId, order: Order) -> Result<bool> {
    let table = graph.table.read();
    table.get(start)?;
    table.get(target)?;
    Ok(reaches(&table, start, target, order))
}

/// Every node reachable from `start` over destination edges.
///
/// `start` is included only if it lies on a cycle.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound) if
/// `start` is absent.
pub fn descendants(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    let table = graph.table.read();
    table.get(start)?;
    Ok(reachable(&table, start, Direction::Outgoing))
}

/// Every node that can reach `start` over destination edges.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound) if
/// `start` is absent.
pub fn ancestors(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    let table = graph.table.read();
    table.get(start)?;
    Ok(reachable(&table, start, Direction::Incoming))
}

impl Graph {
    /// See [`depth_first_search`].
    pub fn depth_first_search(&self, start: NodeId, target: NodeId) -> Result<bool> {
        depth_first_search(self, start, target)
    }

    /// See [`breadth_first_search`].
    pub fn breadth_first_search(&self, start: NodeId, target: NodeId) -> Result<bool> {
        breadth_first_search(self, start, target)
    }

    /// See [`descendants`].
    pub fn descendants(&self, start: NodeId) -> Result<Vec<NodeId>> {
        descendants(self, start)
    }

    /// See [`ancestors`].
    pub fn ancestors(&self, start: NodeId) -> Result<Vec<NodeId>> {
        ancestors(self, start)
    }
}
