//! Versioned, swappable "current graph" reference
//!
//! Rebuilding when the underlying facts change produces a brand-new graph
//! which is swapped in atomically; in-flight searches keep the instance
//! they started with and never observe a half-built graph.

use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use super::graph::TransitGraph;

/// One immutable graph snapshot plus the version it was installed as
#[derive(Debug)]
pub struct VersionedGraph {
    pub version: u64,
    pub graph: TransitGraph,
}

/// Shared handle to the current graph snapshot
#[derive(Debug)]
pub struct GraphHandle {
    current: RwLock<Arc<VersionedGraph>>,
}

impl GraphHandle {
    pub fn new(graph: TransitGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(VersionedGraph { version: 1, graph })),
        }
    }

    /// Snapshot reference for one search (or many); stays valid across swaps
    pub fn current(&self) -> Arc<VersionedGraph> {
        Arc::clone(
            &self
                .current
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Install a fully built replacement graph, returning its version
    pub fn swap(&self, graph: TransitGraph) -> u64 {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let version = slot.version + 1;
        info!(
            "Swapping current graph: v{} ({} nodes, {} edges) -> v{} ({} nodes, {} edges)",
            slot.version,
            slot.graph.node_count(),
            slot.graph.edge_count(),
            version,
            graph.node_count(),
            graph.edge_count()
        );
        *slot = Arc::new(VersionedGraph { version, graph });
        version
    }
}
