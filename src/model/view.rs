use hashbrown::HashSet;

use super::graph::TransitGraph;
use super::types::{Edge, Mode, ModeSet};
use crate::{EdgeIdx, NodeIdx};

/// Read-only filtered view over a [`TransitGraph`]
///
/// Layers mode exclusions and a temporary banned-edge set on top of a
/// borrowed graph without copying or mutating it, so one request's filters
/// never affect a concurrently running search on the same base graph.
#[derive(Debug, Clone)]
pub struct GraphView<'g> {
    graph: &'g TransitGraph,
    excluded_modes: ModeSet,
    banned_edges: HashSet<EdgeIdx>,
}

impl<'g> GraphView<'g> {
    pub fn new(graph: &'g TransitGraph) -> Self {
        Self {
            graph,
            excluded_modes: ModeSet::default(),
            banned_edges: HashSet::new(),
        }
    }

    #[must_use]
    pub fn without_modes(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        for mode in modes {
            self.excluded_modes.insert(mode);
        }
        self
    }

    /// Temporarily remove specific edges (used by the alternatives search)
    pub(crate) fn ban_edges(&mut self, edges: impl IntoIterator<Item = EdgeIdx>) {
        self.banned_edges.extend(edges);
    }

    pub fn graph(&self) -> &'g TransitGraph {
        self.graph
    }

    /// Visible outgoing edges of `node` with their global indices, in
    /// deterministic build order
    pub fn out_edges(&self, node: NodeIdx) -> impl Iterator<Item = (EdgeIdx, &'g Edge)> {
        self.graph
            .out_edge_range(node)
            .filter(|idx| !self.banned_edges.contains(idx))
            .map(|idx| (idx, self.graph.edge(idx)))
            .filter(|(_, edge)| !self.excluded_modes.contains(edge.mode))
    }
}
