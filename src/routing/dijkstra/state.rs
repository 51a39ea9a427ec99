use std::cmp::Ordering;

use crate::NodeIdx;

/// Frontier entry for the label-setting search
///
/// Weights are pre-scaled to integers so ordering is exact and repeated
/// searches are bit-for-bit reproducible.
#[derive(Copy, Clone, Eq, PartialEq)]
pub(super) struct State {
    pub(super) weight: u64,
    pub(super) transfers: u32,
    pub(super) node: NodeIdx,
}

// Min-heap ordering (reversed from standard Rust BinaryHeap), with ties
// broken by fewer transfers, then smaller node index. Node indices are
// lexicographic by node id, so equal-weight frontiers pop deterministically.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.transfers.cmp(&self.transfers))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best label settled so far for one node
#[derive(Copy, Clone, PartialEq, Eq)]
pub(super) struct Label {
    pub(super) weight: u64,
    pub(super) transfers: u32,
}

impl Label {
    /// Lexicographic improvement test: lower weight wins, equal weight
    /// falls back to fewer transfers
    pub(super) fn improves_on(self, other: Self) -> bool {
        (self.weight, self.transfers) < (other.weight, other.transfers)
    }
}
