//! Unit tests for export functionality
//!
//! Tests cover:
//! - export_dot() output validity
//! - export_dot_styled() with options
//! - export_json() D3.js compatibility
//! - export_visjs() page contents

use linkgraph::export::{DotOptions, VisJsOptions};
use linkgraph::{Graph, ROOT_ID};

// root "Intro" -> Algebra -> Quadratics, Algebra -> Quadratics twice
fn create_test_graph() -> linkgraph::Result<Graph> {
    let graph = Graph::new("lessons", false, false);
    graph.set_key(ROOT_ID, "Intro")?;

    let algebra = graph.insert_data_node("Algebra", b"lesson_id 9".to_vec())?;
    let quadratics = graph.insert_data_node("Quadratics", b"lesson_id 55".to_vec())?;

    graph.add_relationship(ROOT_ID, algebra.id())?;
    graph.add_relationship(algebra.id(), quadratics.id())?;
    graph.add_relationship(algebra.id(), quadratics.id())?;

    Ok(graph)
}

#[test]
fn test_export_dot_validity() {
    let graph = create_test_graph().unwrap();

    let dot = graph.export_dot().unwrap();

    assert!(dot.starts_with("digraph \"lessons\" {"));
    assert!(dot.contains("rankdir=TB"));
    assert!(dot.contains("n0 [label=\"Intro\""));
    assert!(dot.contains("n1 [label=\"Algebra\""));
    assert!(dot.contains("n0 -> n1;"));
    assert!(dot.ends_with("}\n"));

    // Parallel edges are drawn once per occurrence
    assert_eq!(dot.matches("n1 -> n2;").count(), 2);
}

#[test]
fn test_export_dot_styled() {
    let graph = create_test_graph().unwrap();

    let options = DotOptions {
        rankdir: "LR".to_string(),
        root_color: "#FF5252".to_string(),
        show_values: true,
        ..DotOptions::default()
    };
    let dot = linkgraph::export::export_dot_styled(&graph, options).unwrap();

    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("Algebra\\nlesson_id 9"));
    // Only the root has no incoming edges
    assert_eq!(dot.matches("#FF5252").count(), 1);
}

#[test]
fn test_export_dot_unkeyed_and_escaped_labels() {
    let graph = Graph::with_name("escapes");
    let plain = graph.insert_node();
    graph
        .insert_data_node("say \"hi\"", Vec::new())
        .unwrap();

    let dot = graph.export_dot().unwrap();

    assert!(dot.contains(&format!("n{0} [label=\"n{0}\"", plain.id())));
    assert!(dot.contains("say \\\"hi\\\""));
}

#[test]
fn test_export_json_d3_compatibility() {
    let graph = create_test_graph().unwrap();

    let json = graph.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["name"], "lessons");
    let nodes = value["nodes"].as_array().unwrap();
    let links = value["links"].as_array().unwrap();

    assert_eq!(nodes.len(), 3);
    for node in nodes {
        assert!(node["id"].is_number());
        assert!(node["key"].is_string());
        assert!(node["value"].is_string());
    }
    assert_eq!(nodes[2]["value"], "lesson_id 55");

    assert_eq!(links.len(), 3);
    for link in links {
        assert!(link["source"].is_number());
        assert!(link["target"].is_number());
    }
}

#[test]
fn test_export_visjs_page() {
    let graph = create_test_graph().unwrap();

    let page = graph.export_visjs(VisJsOptions::default()).unwrap();

    assert!(page.starts_with("<html>"));
    assert!(page.contains("vis-network"));
    assert!(page.contains("\"label\":\"node 1 Algebra\""));
    assert_eq!(page.matches("\"from\":1,").count(), 2);
    assert!(page.trim_end().ends_with("</html>"));
}

#[test]
fn test_export_visjs_value_labels() {
    let graph = create_test_graph().unwrap();

    let options = VisJsOptions {
        show_id: false,
        show_key: true,
        show_value: true,
    };
    let page = graph.export_visjs(options).unwrap();

    assert!(page.contains("\"label\":\"Quadratics lesson_id 55\""));
    assert!(!page.contains("node 2"));
}

#[test]
fn test_export_empty_graph() {
    let graph = Graph::with_name("empty");
    graph.delete_node(ROOT_ID).unwrap();

    let json = graph.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["nodes"].as_array().unwrap().is_empty());

    let dot = graph.export_dot().unwrap();
    assert!(!dot.contains("->"));
}
