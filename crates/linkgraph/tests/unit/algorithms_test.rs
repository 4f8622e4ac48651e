//! Unit tests for reachability searches.

use linkgraph::{Graph, Result, ROOT_ID};
use std::collections::BTreeSet;

// Builds the following tree, plus a stranded node 12:
//
//              0        12 (stranded)
//            / | \
//           1  2  3
//          /  / \  \
//         4  5   6  7
//           /   / \
//          8   9   10
//                   \
//                    11
fn create_tree() -> Result<Graph> {
    let graph = Graph::with_name("testGraph");
    for _ in 1..=12 {
        graph.insert_node();
    }

    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 4),
        (2, 5),
        (2, 6),
        (3, 7),
        (5, 8),
        (6, 9),
        (6, 10),
        (10, 11),
    ];
    for (from, to) in edges {
        graph.add_relationship(from, to)?;
    }

    Ok(graph)
}

// Ladder of `rungs` diamonds: every level has two nodes that both point at
// both nodes of the next level. Path count doubles at each level.
fn create_ladder(rungs: usize) -> Result<(Graph, u64)> {
    let graph = Graph::new("ladder", true, false);
    let mut level = vec![ROOT_ID];
    for _ in 0..rungs {
        let next = vec![graph.insert_node().id(), graph.insert_node().id()];
        for &from in &level {
            for &to in &next {
                graph.add_relationship(from, to)?;
            }
        }
        level = next;
    }
    let sink = graph.insert_node().id();
    Ok((graph, sink))
}

#[test]
fn test_tree_roots() {
    let graph = create_tree().unwrap();
    let expected: BTreeSet<_> = [0, 12].into_iter().collect();
    assert_eq!(graph.find_roots(), expected);
}

#[test]
fn test_search() {
    let graph = create_tree().unwrap();

    assert!(graph.depth_first_search(ROOT_ID, 11).unwrap());
    assert!(!graph.depth_first_search(ROOT_ID, 12).unwrap());
    assert!(graph.breadth_first_search(ROOT_ID, 9).unwrap());
    assert!(!graph.breadth_first_search(ROOT_ID, 12).unwrap());
}

#[test]
fn test_search_follows_direction() {
    let graph = create_tree().unwrap();

    assert!(!graph.depth_first_search(11, ROOT_ID).unwrap());
    assert!(!graph.breadth_first_search(4, 1).unwrap());
    assert!(!graph.depth_first_search(1, 5).unwrap());
}

#[test]
fn test_dfs_and_bfs_agree_on_every_pair() {
    let graph = create_tree().unwrap();

    for start in 0..=12 {
        for target in 0..=12 {
            assert_eq!(
                graph.depth_first_search(start, target).unwrap(),
                graph.breadth_first_search(start, target).unwrap(),
                "{start} -> {target}"
            );
        }
    }
}

#[test]
fn test_node_does_not_find_itself_without_cycle() {
    let graph = create_tree().unwrap();
    for id in 0..=12 {
        assert!(!graph.depth_first_search(id, id).unwrap());
        assert!(!graph.breadth_first_search(id, id).unwrap());
    }
}

#[test]
fn test_self_loop_finds_itself() {
    let graph = create_tree().unwrap();
    graph.add_relationship(12, 12).unwrap();
    assert!(graph.depth_first_search(12, 12).unwrap());
    assert!(graph.breadth_first_search(12, 12).unwrap());
}

#[test]
fn test_remove_relationship_cuts_subtree() {
    let graph = create_tree().unwrap();

    // 9, 10 and 11 hang off 6, which 2 no longer points to
    graph.remove_relationship(2, 6).unwrap();

    for id in 9..=11 {
        assert!(!graph.depth_first_search(2, id).unwrap());
    }
    assert!(graph.depth_first_search(2, 8).unwrap());
}

#[test]
fn test_delete_node_cuts_subtree() {
    let graph = create_tree().unwrap();

    graph.delete_node(6).unwrap();

    for id in 9..=11 {
        assert!(!graph.depth_first_search(2, id).unwrap());
    }
    assert!(graph.get_node(6).is_none());
    assert!(graph.find_roots().contains(&9));
    assert!(graph.find_roots().contains(&10));
}

#[test]
fn test_search_on_missing_node_is_error() {
    let graph = create_tree().unwrap();
    graph.delete_node(6).unwrap();
    assert!(graph.depth_first_search(2, 6).is_err());
    assert!(graph.breadth_first_search(6, 2).is_err());
}

#[test]
fn test_convergent_paths_stay_linear() {
    // 2^40 distinct paths to the sink; only a visited set keeps this fast.
    let (graph, sink) = create_ladder(40).unwrap();
    let last = sink - 1;

    assert!(graph.depth_first_search(ROOT_ID, last).unwrap());
    assert!(!graph.depth_first_search(ROOT_ID, sink).unwrap());
    assert!(!graph.breadth_first_search(ROOT_ID, sink).unwrap());
    // The strict policy runs the same search on every insert.
    assert!(graph.add_relationship(last, ROOT_ID).is_err());
}

#[test]
fn test_long_chain_does_not_overflow() {
    let graph = Graph::with_name("chain");
    let mut prev = ROOT_ID;
    for _ in 0..100_000 {
        let next = graph.insert_node().id();
        graph.add_relationship(prev, next).unwrap();
        prev = next;
    }

    assert!(graph.depth_first_search(ROOT_ID, prev).unwrap());
    assert!(graph.breadth_first_search(ROOT_ID, prev).unwrap());
    assert_eq!(graph.descendants(ROOT_ID).unwrap().len(), 100_000);
}

#[test]
fn test_descendants_and_ancestors() {
    let graph = create_tree().unwrap();

    let below_two: BTreeSet<_> = graph.descendants(2).unwrap().into_iter().collect();
    assert_eq!(below_two, [5, 6, 8, 9, 10, 11].into_iter().collect());

    assert_eq!(graph.ancestors(11).unwrap(), vec![10, 6, 2, 0]);
    assert!(graph.ancestors(12).unwrap().is_empty());
}
