//! Standalone HTML page rendering the graph with vis.js.

use crate::{Graph, GraphError, NodeSnapshot, Result};
use serde_json::json;

/// Which node fields make up a label. Selected fields are joined by spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisJsOptions {
    /// Include "node <id>"
    pub show_id: bool,
    /// Include the key
    pub show_key: bool,
    /// Include the value, read as UTF-8
    pub show_value: bool,
}

impl Default for VisJsOptions {
    fn default() -> Self {
        Self {
            show_id: true,
            show_key: true,
            show_value: false,
        }
    }
}

const PAGE_HEAD: &str = r#"<html>
<head>
    <script type="text/javascript" src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
    <style type="text/css">
        #network {
            width: 800px;
            height: 600px;
            border: 1px solid lightgray;
        }
    </style>
</head>
<body>
<div id="network"></div>
<script type="text/javascript">
"#;

const PAGE_TAIL: &str = r#"    var container = document.getElementById('network');
    var data = { nodes: nodes, edges: edges };
    var network = new vis.Network(container, data, {});
</script>
</body>
</html>
"#;

/// Render `graph` as an HTML page that draws it with vis.js.
///
/// Node and edge data are embedded as JSON, so keys and values need no escaping.
pub fn export_visjs(graph: &Graph, options: VisJsOptions) -> Result<String> {
    let nodes: Vec<NodeSnapshot> = graph.nodes().iter().map(|n| n.snapshot()).collect();

    let node_data: Vec<_> = nodes
        .iter()
        .map(|n| json!({ "id": n.id, "label": label(n, options) }))
        .collect();
    let edge_data: Vec<_> = nodes
        .iter()
        .flat_map(|n| {
            n.destinations
                .iter()
                .map(move |dest| json!({ "from": n.id, "to": dest, "arrows": "middle" }))
        })
        .collect();

    let node_json = serde_json::to_string(&node_data)
        .map_err(|e| GraphError::serialization("Failed to serialize vis.js nodes", Some(e)))?;
    let edge_json = serde_json::to_string(&edge_data)
        .map_err(|e| GraphError::serialization("Failed to serialize vis.js edges", Some(e)))?;

    let mut page = String::from(PAGE_HEAD);
    page.push_str(&format!("    var nodes = new vis.DataSet({node_json});\n"));
    page.push_str(&format!("    var edges = new vis.DataSet({edge_json});\n"));
    page.push_str(PAGE_TAIL);
    Ok(page)
}

fn label(node: &NodeSnapshot, options: VisJsOptions) -> String {
    let mut parts = Vec::new();
    if options.show_id {
        parts.push(format!("node {}", node.id));
    }
    if options.show_key {
        parts.push(node.key.clone());
    }
    if options.show_value {
        parts.push(String::from_utf8_lossy(&node.value).into_owned());
    }
    parts.join(" ")
}
