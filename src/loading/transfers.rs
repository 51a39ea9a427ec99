use geo::{Distance, Haversine};
use log::info;

use super::config::GraphConfig;
use crate::model::{Edge, Mode, Node};

/// Synthesize walking-transfer edges between nearby nodes of disjoint modes
///
/// Mirrors the asserted-fact transfers: bidirectional, zero cost, duration
/// from the configured walking speed. Runs before adjacency assembly so the
/// derived edges take part in normalization like any other edge.
pub(super) fn derive_transfers(nodes: &[Node], edges: &mut Vec<Edge>, config: &GraphConfig) {
    let before = edges.len();

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if a.modes.is_empty() || b.modes.is_empty() || a.modes.intersects(b.modes) {
                continue;
            }

            let meters = Haversine.distance(a.geometry, b.geometry);
            if meters > config.max_transfer_distance {
                continue;
            }

            let minutes = (meters / 1000.0) / config.walking_speed * 60.0;
            for (source, target) in [(i, j), (j, i)] {
                edges.push(Edge {
                    source,
                    target,
                    mode: Mode::WalkingTransfer,
                    time: minutes,
                    cost: 0.0,
                    is_transfer: true,
                    line: None,
                });
            }
        }
    }

    info!(
        "Derived {} walking transfers between {} nodes",
        edges.len() - before,
        nodes.len()
    );
}
