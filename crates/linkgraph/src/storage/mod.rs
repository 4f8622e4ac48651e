//! Storage backends for encoded graph images.
//!
//! This module defines the [`StorageBackend`] trait and provides implementations:
//! - [`MemoryBackend`]: in-process map, lost on drop
//! - `RocksDBBackend`: persistent storage (requires the `rocksdb-backend` feature)
//!
//! A graph is stored as a single value, the output of
//! [`Graph::encode`](crate::Graph::encode), under the key `graph:<name>`.
//! Encoding always completes before the backend is called, so no graph guard
//! is held during I/O.

mod memory;
#[cfg(feature = "rocksdb-backend")]
mod rocksdb_backend;

pub use memory::MemoryBackend;
#[cfg(feature = "rocksdb-backend")]
pub use rocksdb_backend::RocksDBBackend;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use log::{debug, info};

/// Key-value pair for storage operations.
pub type KeyValue = (Vec<u8>, Vec<u8>);

const GRAPH_PREFIX: &str = "graph:";

/// Trait defining the storage backend interface.
///
/// All storage operations are explicit and return `Result` to handle failures.
pub trait StorageBackend: Send + Sync {
    /// Store a key-value pair, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the write fails.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Retrieve a value by key. Returns `Ok(None)` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the read fails.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Delete a key-value pair. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the delete fails.
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Check if a key exists.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the check fails.
    fn exists(&self, key: &[u8]) -> Result<bool>;

    /// All key-value pairs whose key starts with `prefix`, in key order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if iteration fails.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>>;

    /// Flush any buffered writes to durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if flush fails.
    fn flush(&mut self) -> Result<()>;
}

fn graph_key(name: &str) -> Vec<u8> {
    format!("{GRAPH_PREFIX}{name}").into_bytes()
}

/// Encode `graph` and store it under its name, replacing any earlier image.
///
/// # Errors
///
/// Returns [`GraphError::Storage`] if the backend write fails.
pub fn save_graph(graph: &Graph, backend: &mut dyn StorageBackend) -> Result<()> {
    let image = graph.encode()?;
    backend.put(&graph_key(graph.name()), &image)?;
    info!(
        "Saved graph '{}' ({} nodes, {} bytes)",
        graph.name(),
        graph.node_count(),
        image.len()
    );
    Ok(())
}

/// Load and decode the graph stored under `name`.
///
/// # Errors
///
/// Returns [`GraphError::GraphNotFound`] if no image is stored under `name`,
/// and [`GraphError::CorruptData`] if the image does not decode.
pub fn load_graph(backend: &dyn StorageBackend, name: &str) -> Result<Graph> {
    let image = backend
        .get(&graph_key(name))?
        .ok_or_else(|| GraphError::GraphNotFound {
            name: name.to_string(),
        })?;
    debug!("Read {} byte image for graph '{name}'", image.len());
    Graph::decode(&image)
}

/// Remove the image stored under `name`. Removing a missing graph is not an error.
///
/// # Errors
///
/// Returns [`GraphError::Storage`] if the backend delete fails.
pub fn delete_graph(backend: &mut dyn StorageBackend, name: &str) -> Result<()> {
    debug!("Deleting stored graph '{name}'");
    backend.delete(&graph_key(name))
}

/// Names of every graph stored in `backend`, in key order.
///
/// # Errors
///
/// Returns [`GraphError::Storage`] if the scan fails, and
/// [`GraphError::CorruptData`] if a stored name is not valid UTF-8.
pub fn list_graphs(backend: &dyn StorageBackend) -> Result<Vec<String>> {
    backend
        .scan_prefix(GRAPH_PREFIX.as_bytes())?
        .into_iter()
        .map(|(key, _)| {
            String::from_utf8(key[GRAPH_PREFIX.len()..].to_vec())
                .map_err(|e| GraphError::corrupt("Stored graph name is not UTF-8", Some(e)))
        })
        .collect()
}
