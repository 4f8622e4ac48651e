//! Integration test for MemoryBackend save/load operations.

use linkgraph::storage::{delete_graph, list_graphs};
use linkgraph::{Graph, GraphError, MemoryBackend, StorageBackend, ROOT_ID};

fn create_chain(name: &str, len: usize) -> Graph {
    let graph = Graph::new(name, false, false);
    let mut prev = ROOT_ID;
    for i in 0..len {
        let node = graph
            .insert_data_node(format!("step_{i}"), format!("payload {i}"))
            .unwrap();
        graph.add_relationship(prev, node.id()).unwrap();
        prev = node.id();
    }
    graph
}

#[test]
fn test_save_and_load() {
    let mut backend = MemoryBackend::new();
    let graph = create_chain("chain", 5);

    graph.save(&mut backend).unwrap();
    let loaded = Graph::load(&backend, "chain").unwrap();

    assert_eq!(loaded.name(), "chain");
    assert_eq!(loaded.node_count(), 6);
    assert_eq!(loaded.edge_count(), 5);
    let last = loaded.find_node_id_by_key("step_4").unwrap();
    assert!(loaded.depth_first_search(ROOT_ID, last).unwrap());
    assert!(loaded.add_relationship(last, ROOT_ID).is_err());
}

#[test]
fn test_save_replaces_previous_image() {
    let mut backend = MemoryBackend::new();
    let graph = create_chain("chain", 2);
    graph.save(&mut backend).unwrap();

    graph.insert_data_node("late", Vec::new()).unwrap();
    graph.save(&mut backend).unwrap();

    let loaded = Graph::load(&backend, "chain").unwrap();
    assert!(loaded.find_node_by_key("late").is_some());
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_clones_share_storage() {
    let mut writer = MemoryBackend::new();
    let reader = writer.clone();

    create_chain("shared", 3).save(&mut writer).unwrap();

    assert_eq!(Graph::load(&reader, "shared").unwrap().node_count(), 4);
}

#[test]
fn test_list_and_delete_graphs() {
    let mut backend = MemoryBackend::new();
    create_chain("b", 1).save(&mut backend).unwrap();
    create_chain("a", 1).save(&mut backend).unwrap();

    assert_eq!(list_graphs(&backend).unwrap(), vec!["a", "b"]);

    delete_graph(&mut backend, "a").unwrap();
    assert_eq!(list_graphs(&backend).unwrap(), vec!["b"]);
    // Deleting again is fine
    delete_graph(&mut backend, "a").unwrap();

    assert!(matches!(
        Graph::load(&backend, "a"),
        Err(GraphError::GraphNotFound { ref name }) if name == "a"
    ));
}

#[test]
fn test_load_corrupt_image() {
    let mut backend = MemoryBackend::new();
    let image = create_chain("broken", 3).encode().unwrap();
    backend
        .put(b"graph:broken", &image[..image.len() / 2])
        .unwrap();

    assert!(matches!(
        Graph::load(&backend, "broken"),
        Err(GraphError::CorruptData { .. })
    ));
}

#[test]
fn test_memory_backend_clear() {
    let mut backend = MemoryBackend::new();
    create_chain("gone", 1).save(&mut backend).unwrap();
    assert!(!backend.is_empty());

    backend.clear();

    assert!(backend.is_empty());
    assert!(list_graphs(&backend).unwrap().is_empty());
    backend.flush().unwrap();
}
