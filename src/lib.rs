//! Route planning core for multi-modal tourist itineraries
//!
//! `mobigraph` compiles semantic (subject, predicate, object) facts about an
//! urban transit network into an immutable typed graph and answers
//! multi-criteria shortest-path queries over it. Stops and points of interest
//! become nodes, transit segments and walking transfers become directed
//! weighted edges, and searches optimize a caller-supplied blend of travel
//! time, monetary cost and transfer count.
//!
//! The crate performs no I/O. Facts arrive through the [`triples`] adapter,
//! finished itineraries leave as plain structured data for whatever layer
//! serializes them.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod triples;

pub use error::{BuildError, PlanError, QueryError};
pub use loading::{GraphConfig, build_graph};
pub use model::{Edge, GraphHandle, GraphView, Mode, ModeSet, Node, TransitGraph};
pub use routing::{
    Itinerary, Leg, SearchCriteria, Tour, TourCriteria, Weighting, plan_alternatives,
    plan_route, plan_tour,
};
pub use triples::{Triple, TriplePattern, TripleStore};

/// Index of a node within a [`TransitGraph`]
///
/// Indices are assigned in lexicographic order of the node ids, so index
/// comparisons double as id comparisons during search tie-breaking.
pub type NodeIdx = usize;

/// Index of an edge within a [`TransitGraph`]
pub type EdgeIdx = usize;

/// Travel time in minutes
pub type Minutes = f64;

/// Monetary cost in the network's fare currency (IDR for the seed data)
pub type Money = f64;

/// Upper bound on the number of alternative itineraries one search may return
pub const MAX_ALTERNATIVES: usize = 5;
