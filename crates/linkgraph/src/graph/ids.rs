//! Small helpers over id lists shared by the edge engine and the encoder.

use super::NodeId;
use std::collections::BTreeMap;

/// Remove every occurrence of `id` from `list`, keeping the order of the rest.
///
/// Returns how many entries were removed.
pub(crate) fn remove_all(list: &mut Vec<NodeId>, id: NodeId) -> usize {
    let before = list.len();
    list.retain(|&x| x != id);
    before - list.len()
}

/// Number of times `id` occurs in `list`.
#[cfg(test)]
pub(crate) fn occurrences(list: &[NodeId], id: NodeId) -> usize {
    list.iter().filter(|&&x| x == id).count()
}

/// Derive the source relation from a forward relation.
///
/// For every `(a, dests)` and every `b` in `dests`, `a` is appended to the
/// entry for `b` once per occurrence. Entries are ordered by the iteration
/// order of `forward`.
pub(crate) fn invert<'a, I>(forward: I) -> BTreeMap<NodeId, Vec<NodeId>>
where
    I: IntoIterator<Item = (NodeId, &'a [NodeId])>,
{
    let mut inverse: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for (from, dests) in forward {
        for &to in dests {
            inverse.entry(to).or_default().push(from);
        }
    }
    inverse
}

/// True if both lists hold the same ids with the same multiplicities.
pub(crate) fn same_multiset(a: &[NodeId], b: &[NodeId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
