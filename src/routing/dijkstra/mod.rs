//! Label-setting shortest-path search over the weighted transport graph

mod state;

use std::collections::BinaryHeap;

use log::debug;

use self::state::{Label, State};
use crate::model::{Edge, GraphView, WeightRefs};
use crate::routing::criteria::Weighting;
use crate::{EdgeIdx, NodeIdx};

/// Fixed-point scale applied to combined edge weights
///
/// Normalized weights are at most `time + cost + transfer = 1` per edge, so
/// even very long paths stay far from overflowing u64 at this resolution.
const WEIGHT_SCALE: f64 = 1e9;

/// Combined, normalized weight of one edge under the given weighting
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn edge_weight(edge: &Edge, refs: WeightRefs, weighting: &Weighting) -> u64 {
    let normalized = weighting.time * (edge.time / refs.max_time)
        + weighting.cost * (edge.cost / refs.max_cost)
        + weighting.transfer * f64::from(u8::from(edge.is_transfer));
    (normalized * WEIGHT_SCALE).round() as u64
}

/// Minimum-weight path from `origin` to `destination` as a sequence of
/// global edge indices, or `None` when the frontier empties first
///
/// Dijkstra over non-negative combined weights: nodes are expanded in
/// increasing tentative-weight order and the search stops the first time
/// the destination pops. Ties are fully ordered (weight, then transfer
/// count, then node index), so equal-weight inputs always yield the same
/// path.
pub(crate) fn shortest_path(
    view: &GraphView<'_>,
    origin: NodeIdx,
    destination: NodeIdx,
    weighting: &Weighting,
) -> Option<Vec<EdgeIdx>> {
    let graph = view.graph();
    let refs = graph.weight_refs();

    let mut labels: Vec<Option<Label>> = vec![None; graph.node_count()];
    let mut predecessor: Vec<Option<EdgeIdx>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::with_capacity(graph.node_count() / 4 + 1);

    labels[origin] = Some(Label {
        weight: 0,
        transfers: 0,
    });
    heap.push(State {
        weight: 0,
        transfers: 0,
        node: origin,
    });

    let mut settled = 0usize;

    while let Some(State {
        weight,
        transfers,
        node,
    }) = heap.pop()
    {
        if node == destination {
            debug!("Search settled {settled} nodes before reaching the destination");
            return Some(reconstruct(view, origin, destination, &predecessor));
        }

        // Skip stale frontier entries
        match labels[node] {
            Some(best) if (weight, transfers) > (best.weight, best.transfers) => continue,
            _ => {}
        }
        settled += 1;

        for (edge_idx, edge) in view.out_edges(node) {
            let candidate = Label {
                weight: weight + edge_weight(edge, refs, weighting),
                transfers: transfers + u32::from(edge.is_transfer),
            };

            let improved = match labels[edge.target] {
                Some(existing) => candidate.improves_on(existing),
                None => true,
            };
            if improved {
                labels[edge.target] = Some(candidate);
                predecessor[edge.target] = Some(edge_idx);
                heap.push(State {
                    weight: candidate.weight,
                    transfers: candidate.transfers,
                    node: edge.target,
                });
            }
        }
    }

    debug!("Search exhausted the frontier after settling {settled} nodes");
    None
}

fn reconstruct(
    view: &GraphView<'_>,
    origin: NodeIdx,
    destination: NodeIdx,
    predecessor: &[Option<EdgeIdx>],
) -> Vec<EdgeIdx> {
    let mut path = Vec::new();
    let mut current = destination;
    while current != origin {
        // The destination was popped, so the predecessor chain is complete
        let Some(edge_idx) = predecessor[current] else {
            break;
        };
        path.push(edge_idx);
        current = view.graph().edge(edge_idx).source;
    }
    path.reverse();
    path
}

/// Up to `k` distinct paths, best first
///
/// Repeated search with temporary edge removal: after each discovered path
/// its edges are banned from the view and the search reruns, so every
/// alternative is edge-disjoint from the ones before it.
pub(crate) fn k_shortest_paths(
    mut view: GraphView<'_>,
    origin: NodeIdx,
    destination: NodeIdx,
    weighting: &Weighting,
    k: usize,
) -> Vec<Vec<EdgeIdx>> {
    let mut paths = Vec::new();

    while paths.len() < k {
        let Some(path) = shortest_path(&view, origin, destination, weighting) else {
            break;
        };
        view.ban_edges(path.iter().copied());
        paths.push(path);
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{GraphConfig, build_graph};
    use crate::model::TransitGraph;
    use crate::triples::{Triple, TripleStore, vocab};

    fn line_graph() -> TransitGraph {
        // a -> b -> c plus a slow direct a -> c
        let mut store = TripleStore::new();
        for id in ["a", "b", "c"] {
            store.insert(Triple::new(id, vocab::TYPE, vocab::STOP));
            store.insert(Triple::new(id, vocab::HAS_COORDINATES, "-6.2,106.8"));
        }
        for (conn, from, to, time) in [
            ("ab", "a", "b", "10"),
            ("bc", "b", "c", "15"),
            ("ac", "a", "c", "40"),
        ] {
            store.insert(Triple::new(conn, vocab::TYPE, vocab::CONNECTION));
            store.insert(Triple::new(conn, vocab::CONNECTS_FROM, from));
            store.insert(Triple::new(conn, vocab::CONNECTS_TO, to));
            store.insert(Triple::new(conn, vocab::HAS_MODE, "bus-rapid-transit"));
            store.insert(Triple::new(conn, vocab::TRAVEL_TIME, time));
            store.insert(Triple::new(conn, vocab::COST, "3500"));
        }
        build_graph(&store, &GraphConfig::default()).unwrap()
    }

    #[test]
    fn finds_the_lighter_two_hop_path() {
        let graph = line_graph();
        let view = GraphView::new(&graph);
        let path = shortest_path(&view, 0, 2, &Weighting::time_only()).unwrap();

        let hops: Vec<_> = path.iter().map(|&e| graph.edge(e).target).collect();
        assert_eq!(hops, vec![1, 2]);
    }

    #[test]
    fn alternatives_are_edge_disjoint_and_ranked() {
        let graph = line_graph();
        let view = GraphView::new(&graph);
        let paths = k_shortest_paths(view, 0, 2, &Weighting::time_only(), 5);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 2); // via b
        assert_eq!(paths[1].len(), 1); // direct
        assert!(paths[0].iter().all(|e| !paths[1].contains(e)));
    }

    #[test]
    fn disconnected_destination_yields_none() {
        let graph = line_graph();
        let view = GraphView::new(&graph);
        // Nothing leads back to "a"
        assert!(shortest_path(&view, 2, 0, &Weighting::time_only()).is_none());
    }
}
