//! Export module for visualizing graphs in external tools.
//!
//! Exporters only use [`Graph::nodes`](crate::Graph::nodes) and the snapshot
//! accessors on each node, so they never hold a graph guard while rendering.
//!
//! Supported formats:
//! - **DOT**: Graphviz visualization
//! - **JSON**: D3.js and web-based tools
//! - **vis.js**: self-contained HTML page

pub mod dot;
pub mod json;
pub mod visjs;

pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::export_json;
pub use visjs::{export_visjs, VisJsOptions};

use crate::{Graph, Result};
use log::warn;

/// Node count above which exports log a warning.
const LARGE_EXPORT: usize = 10_000;

impl Graph {
    /// Export to Graphviz DOT format. See [`export_dot`].
    pub fn export_dot(&self) -> Result<String> {
        self.warn_if_large();
        export_dot(self)
    }

    /// Export to D3.js-compatible JSON. See [`export_json`].
    pub fn export_json(&self) -> Result<String> {
        self.warn_if_large();
        export_json(self)
    }

    /// Export to a vis.js HTML page. See [`export_visjs`].
    pub fn export_visjs(&self, options: VisJsOptions) -> Result<String> {
        self.warn_if_large();
        export_visjs(self, options)
    }

    fn warn_if_large(&self) {
        let node_count = self.node_count();
        if node_count > LARGE_EXPORT {
            warn!("Exporting large graph '{}' ({node_count} nodes)", self.name());
        }
    }
}
