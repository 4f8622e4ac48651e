//! Graph construction settings.

use serde::{Deserialize, Serialize};

/// Policy flags and label for a new [`Graph`](crate::Graph).
///
/// Both policies are fixed for the lifetime of the graph built from this
/// config. The default is permissive: duplicate keys and cycles are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Opaque label carried through encoding and used as the storage key
    pub name: String,

    /// Allow several nodes to share one key
    pub allow_duplicate_keys: bool,

    /// Allow edges that close a cycle
    pub allow_circular: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            allow_duplicate_keys: true,
            allow_circular: true,
        }
    }
}

impl GraphConfig {
    /// Permissive config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Config that rejects both duplicate keys and cycles.
    pub fn strict(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_duplicate_keys: false,
            allow_circular: false,
        }
    }

    /// Set the duplicate-key policy
    pub fn with_duplicate_keys(mut self, allow: bool) -> Self {
        self.allow_duplicate_keys = allow;
        self
    }

    /// Set the circularity policy
    pub fn with_circular(mut self, allow: bool) -> Self {
        self.allow_circular = allow;
        self
    }

    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::GraphError::serialization("Failed to parse graph config", Some(e)))
    }
}
