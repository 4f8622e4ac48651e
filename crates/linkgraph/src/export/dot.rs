//! DOT format export for Graphviz visualization.

use crate::{Graph, Result};

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Fill color for nodes without incoming edges
    pub root_color: String,
    /// Fill color for every other node
    pub node_color: String,
    /// Append the value, read as UTF-8, to each label
    pub show_values: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            rankdir: "TB".to_string(),
            root_color: "#FFE082".to_string(),
            node_color: "#90CAF9".to_string(),
            show_values: false,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot(graph: &Graph) -> Result<String> {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
///
/// Parallel edges are emitted once per occurrence.
pub fn export_dot_styled(graph: &Graph, options: DotOptions) -> Result<String> {
    let nodes: Vec<_> = graph.nodes().iter().map(|n| n.snapshot()).collect();
    let mut output = String::new();

    output.push_str(&format!("digraph \"{}\" {{\n", escape_dot_label(graph.name())));
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [style=filled, shape=box];\n\n");

    for node in &nodes {
        let mut label = if node.key.is_empty() {
            format!("n{}", node.id)
        } else {
            escape_dot_label(&node.key)
        };
        if options.show_values && !node.value.is_empty() {
            label.push_str("\\n");
            label.push_str(&escape_dot_label(&String::from_utf8_lossy(&node.value)));
        }

        let color = if node.sources.is_empty() {
            &options.root_color
        } else {
            &options.node_color
        };

        output.push_str(&format!(
            "    n{} [label=\"{label}\", fillcolor=\"{color}\"];\n",
            node.id
        ));
    }

    output.push('\n');

    for node in &nodes {
        for dest in &node.destinations {
            output.push_str(&format!("    n{} -> n{dest};\n", node.id));
        }
    }

    output.push_str("}\n");

    Ok(output)
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
