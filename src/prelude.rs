// Re-export key components
pub use crate::error::{BuildError, PlanError, QueryError};
pub use crate::loading::{GraphConfig, build_graph};
pub use crate::model::{
    Edge, GraphHandle, GraphView, Mode, ModeSet, Node, NodeKind, TransitGraph, VersionedGraph,
};
pub use crate::routing::{
    Itinerary, Leg, SearchCriteria, Tour, TourCriteria, Weighting, plan_alternatives,
    plan_route, plan_tour,
};
pub use crate::triples::{Triple, TriplePattern, TripleStore, vocab};

// Core index and measure aliases
pub use crate::EdgeIdx;
pub use crate::Minutes;
pub use crate::Money;
pub use crate::NodeIdx;

pub use crate::MAX_ALTERNATIVES;
