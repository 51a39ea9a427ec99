//! Immutable transport graph with flat, index-based adjacency

use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use log::debug;

use super::types::{Edge, Mode, Node, WeightRefs};
use crate::{EdgeIdx, NodeIdx};

/// Typed transport graph compiled from a fact-set snapshot
///
/// Nodes are stored sorted by id; edges are grouped by source node in one
/// flat vector with a start-offset table, in the style of a CSR matrix.
/// The graph is a multigraph and is never mutated after construction, so
/// any number of searches may share one instance without coordination.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    nodes: Vec<Node>,
    node_index: HashMap<String, NodeIdx>,
    /// All edges, grouped by source; within one source the original fact
    /// order is preserved as the search tie-break
    edges: Vec<Edge>,
    /// Per-node offset into `edges`, length `nodes.len() + 1`
    adjacency_start: Vec<usize>,
    weight_refs: WeightRefs,
}

impl TransitGraph {
    /// Assemble a graph from already-validated parts
    ///
    /// `nodes` must be sorted by id and `edges` must only reference indices
    /// into it; the builder guarantees both. The relative order of edges
    /// sharing a source node is preserved.
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        weight_refs: WeightRefs,
    ) -> Self {
        debug_assert!(nodes.is_sorted_by(|a, b| a.id < b.id));
        debug_assert!(
            edges
                .iter()
                .all(|e| e.source < nodes.len() && e.target < nodes.len())
        );

        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();

        // Counting sort by source keeps the per-source input order intact
        let mut counts = vec![0usize; nodes.len() + 1];
        for edge in &edges {
            counts[edge.source + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let adjacency_start = counts.clone();

        let mut grouped: Vec<Option<Edge>> = vec![None; edges.len()];
        let mut next_slot = counts;
        for edge in edges {
            let slot = next_slot[edge.source];
            next_slot[edge.source] += 1;
            grouped[slot] = Some(edge);
        }
        let edges: Vec<Edge> = grouped.into_iter().flatten().collect();

        Self {
            nodes,
            node_index,
            edges,
            adjacency_start,
            weight_refs,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx]
    }

    /// Index of the node with the given stable id
    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.node_index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Outgoing edges of `node`, in deterministic build order
    pub fn out_edges(&self, node: NodeIdx) -> &[Edge] {
        let range = self.out_edge_range(node);
        &self.edges[range]
    }

    /// Global edge-index range of `node`'s outgoing edges
    pub fn out_edge_range(&self, node: NodeIdx) -> std::ops::Range<EdgeIdx> {
        self.adjacency_start[node]..self.adjacency_start[node + 1]
    }

    pub fn weight_refs(&self) -> WeightRefs {
        self.weight_refs
    }

    /// New independent graph restricted to one region
    ///
    /// Keeps nodes whose region tag matches, plus nodes flagged as
    /// cross-region gateways, plus edges whose both endpoints survive.
    /// Shares no mutable state with `self` and reuses the parent's
    /// normalization constants so weights stay comparable. Idempotent.
    /// An edgeless result is not an error here; the search reports
    /// `NoRouteFound` instead.
    pub fn restrict_to_region(&self, region: &str) -> TransitGraph {
        let mut remap: Vec<Option<NodeIdx>> = vec![None; self.nodes.len()];
        let mut kept_nodes = Vec::new();

        for (idx, node) in self.nodes.iter().enumerate() {
            if node.region == region || node.gateway {
                remap[idx] = Some(kept_nodes.len());
                kept_nodes.push(node.clone());
            }
        }

        let kept_edges: Vec<Edge> = self
            .edges
            .iter()
            .filter_map(|edge| {
                let source = remap[edge.source]?;
                let target = remap[edge.target]?;
                Some(Edge {
                    source,
                    target,
                    ..edge.clone()
                })
            })
            .collect();

        debug!(
            "Region filter '{}' kept {} of {} nodes, {} of {} edges",
            region,
            kept_nodes.len(),
            self.nodes.len(),
            kept_edges.len(),
            self.edges.len()
        );

        TransitGraph::from_parts(kept_nodes, kept_edges, self.weight_refs)
    }

    /// Closest node to `point` by haversine distance, optionally limited to
    /// nodes serviced by `mode`. Returns the node index and the distance in
    /// meters.
    pub fn nearest_node(&self, point: Point<f64>, mode: Option<Mode>) -> Option<(NodeIdx, f64)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| mode.is_none_or(|m| node.modes.contains(m)))
            .map(|(idx, node)| (idx, Haversine.distance(point, node.geometry)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
