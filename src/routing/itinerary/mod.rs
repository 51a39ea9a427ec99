//! Conversion of found paths into caller-facing itineraries

mod to_geojson;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::model::{Mode, TransitGraph};
use crate::{EdgeIdx, Minutes, Money};

/// One leg of an itinerary: a run of consecutive edges on the same
/// physical service, annotated with cumulative totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
    pub mode: Mode,
    pub line: Option<String>,
    /// Intermediate node ids between `from` and `to`
    pub via: Vec<String>,
    /// Number of traversed edges merged into this leg
    pub hops: usize,
    pub duration: Minutes,
    pub cost: Money,
    pub is_transfer: bool,
    pub cumulative_duration: Minutes,
    pub cumulative_cost: Money,
}

/// Ordered list of legs with totals; plain data for the API layer to
/// serialize however it likes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub legs: Vec<Leg>,
    pub total_duration: Minutes,
    pub total_cost: Money,
    pub transfers: usize,
}

impl Itinerary {
    /// Zero-leg itinerary for origin == destination requests
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// A multi-destination trip: the visiting order chosen by the planner plus
/// one itinerary per consecutive stop pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Destination ids in visiting order
    pub order: Vec<String>,
    pub segments: Vec<Itinerary>,
    pub total_duration: Minutes,
    pub total_cost: Money,
    pub transfers: usize,
}

/// Formats a found path as an itinerary
///
/// Walks the edge sequence once, merging consecutive edges of identical
/// mode and line into one leg (one tram ride stays one leg) and
/// accumulating time and cost. A non-contiguous edge sequence cannot come
/// out of the search and is reported as a contract breach.
pub(crate) fn format_itinerary(
    graph: &TransitGraph,
    path: &[EdgeIdx],
) -> Result<Itinerary, PlanError> {
    if path.is_empty() {
        return Ok(Itinerary::empty());
    }

    for (a, b) in path.iter().tuple_windows() {
        if graph.edge(*a).target != graph.edge(*b).source {
            return Err(PlanError::InvariantViolation(format!(
                "non-contiguous path: edge {a} ends at node {} but edge {b} starts at node {}",
                graph.edge(*a).target,
                graph.edge(*b).source
            )));
        }
    }

    let mut legs: Vec<Leg> = Vec::new();
    let mut cumulative_duration = 0.0;
    let mut cumulative_cost = 0.0;

    for &edge_idx in path {
        let edge = graph.edge(edge_idx);
        cumulative_duration += edge.time;
        cumulative_cost += edge.cost;

        let same_service = legs
            .last()
            .is_some_and(|leg| leg.mode == edge.mode && leg.line.as_deref() == edge.line.as_deref());

        if same_service {
            // Extend the open leg instead of fragmenting the ride
            let leg = legs
                .last_mut()
                .ok_or_else(|| PlanError::InvariantViolation("merge without open leg".into()))?;
            let reached = graph.node(edge.target);
            leg.via.push(leg.to.clone());
            leg.to = reached.id.clone();
            leg.to_name = reached.name.clone();
            leg.hops += 1;
            leg.duration += edge.time;
            leg.cost += edge.cost;
            leg.cumulative_duration = cumulative_duration;
            leg.cumulative_cost = cumulative_cost;
        } else {
            let from = graph.node(edge.source);
            let to = graph.node(edge.target);
            legs.push(Leg {
                from: from.id.clone(),
                from_name: from.name.clone(),
                to: to.id.clone(),
                to_name: to.name.clone(),
                mode: edge.mode,
                line: edge.line.clone(),
                via: Vec::new(),
                hops: 1,
                duration: edge.time,
                cost: edge.cost,
                is_transfer: edge.is_transfer,
                cumulative_duration,
                cumulative_cost,
            });
        }
    }

    let transfers = legs.iter().filter(|leg| leg.is_transfer).count();

    Ok(Itinerary {
        legs,
        total_duration: cumulative_duration,
        total_cost: cumulative_cost,
        transfers,
    })
}
