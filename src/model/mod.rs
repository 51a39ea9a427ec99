//! Data model for the multi-modal transport graph
//!
//! Contains the node/edge types, the immutable graph with its region and
//! mode filters, and the swappable current-graph reference.

pub mod graph;
pub mod snapshot;
pub mod types;
pub mod view;

pub use graph::TransitGraph;
pub use snapshot::{GraphHandle, VersionedGraph};
pub use types::{Edge, Mode, ModeSet, Node, NodeKind, WeightRefs};
pub use view::GraphView;
