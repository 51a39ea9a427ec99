//! Multi-criteria route planning over an immutable transport graph

mod criteria;
mod dijkstra;
pub mod itinerary;

use geo::{Distance, Haversine};
use hashbrown::HashSet;
use log::debug;

pub use criteria::{SearchCriteria, TourCriteria, Weighting};
pub use itinerary::{Itinerary, Leg, Tour};

use crate::error::PlanError;
use crate::model::{GraphView, TransitGraph};
use crate::{MAX_ALTERNATIVES, NodeIdx};

/// Plans the single best itinerary for the given criteria
///
/// Applies the optional region restriction, runs the label-setting search
/// and formats the result. Errors are local to this call and never affect
/// the shared graph or other concurrent searches.
///
/// # Errors
///
/// [`PlanError::UnknownNode`] when origin or destination does not exist in
/// the base graph; [`PlanError::NoRouteFound`] when no connecting path
/// exists (including when the region filter removed every connection);
/// [`PlanError::InvalidCriteria`] for a malformed weighting.
pub fn plan_route(
    graph: &TransitGraph,
    criteria: &SearchCriteria,
) -> Result<Itinerary, PlanError> {
    let (graph, restricted) = prepare(graph, criteria)?;
    let graph = restricted.as_ref().unwrap_or(graph);
    let itinerary = plan_single(graph, criteria)?;

    debug!(
        "Planned {} -> {}: {} legs, {:.1} min, {:.0} cost",
        criteria.origin,
        criteria.destination,
        itinerary.legs.len(),
        itinerary.total_duration,
        itinerary.total_cost
    );
    Ok(itinerary)
}

/// Plans up to `k` distinct itineraries, best first
///
/// Alternatives are found by repeated search with temporary edge removal
/// per discovered path; `k` is capped at [`MAX_ALTERNATIVES`]. At least one
/// itinerary is returned, otherwise the call fails like [`plan_route`].
pub fn plan_alternatives(
    graph: &TransitGraph,
    criteria: &SearchCriteria,
    k: usize,
) -> Result<Vec<Itinerary>, PlanError> {
    let (graph, restricted) = prepare(graph, criteria)?;
    let graph = restricted.as_ref().unwrap_or(graph);

    let (origin, destination) = endpoints(graph, criteria)?;
    if origin == destination {
        return Ok(vec![Itinerary::empty()]);
    }

    let view = GraphView::new(graph).without_modes(criteria.excluded_modes.iter().copied());
    let paths = dijkstra::k_shortest_paths(
        view,
        origin,
        destination,
        &criteria.weighting,
        k.min(MAX_ALTERNATIVES),
    );
    if paths.is_empty() {
        return Err(no_route(criteria));
    }

    paths
        .iter()
        .map(|path| itinerary::format_itinerary(graph, path))
        .collect()
}

/// Plans a trip visiting every destination in the set, origin first
///
/// The visiting order is a nearest-neighbor heuristic over haversine
/// distance: from the current stop the closest unvisited destination comes
/// next, with distance ties broken toward the smaller node index. Each
/// consecutive pair is then planned like [`plan_route`] and the segments
/// are chained; duplicate destination ids collapse to one visit.
///
/// # Errors
///
/// [`PlanError::InvalidCriteria`] for an empty destination set or a
/// malformed weighting; [`PlanError::UnknownNode`] when the origin or any
/// destination is absent from the graph; [`PlanError::NoRouteFound`] when
/// some consecutive pair has no connecting path.
pub fn plan_tour(graph: &TransitGraph, criteria: &TourCriteria) -> Result<Tour, PlanError> {
    criteria.weighting.validate()?;
    if criteria.destinations.is_empty() {
        return Err(PlanError::InvalidCriteria(
            "a tour needs at least one destination".to_string(),
        ));
    }

    let origin = graph
        .index_of(&criteria.origin)
        .ok_or_else(|| PlanError::UnknownNode(criteria.origin.clone()))?;

    let mut seen = HashSet::new();
    let mut remaining = Vec::with_capacity(criteria.destinations.len());
    for id in &criteria.destinations {
        let idx = graph
            .index_of(id)
            .ok_or_else(|| PlanError::UnknownNode(id.clone()))?;
        if seen.insert(idx) {
            remaining.push(idx);
        }
    }

    let order = nearest_neighbor_order(graph, origin, remaining);

    let mut segments = Vec::with_capacity(order.len());
    let mut from = criteria.origin.clone();
    for &idx in &order {
        let to = graph.node(idx).id.clone();
        let segment_criteria = SearchCriteria {
            origin: from,
            destination: to.clone(),
            region: None,
            weighting: criteria.weighting,
            excluded_modes: criteria.excluded_modes.clone(),
        };
        segments.push(plan_single(graph, &segment_criteria)?);
        from = to;
    }

    debug!(
        "Planned tour from {}: {} stops, {:.1} min total",
        criteria.origin,
        order.len(),
        segments.iter().map(|s| s.total_duration).sum::<f64>()
    );

    Ok(Tour {
        order: order.iter().map(|&idx| graph.node(idx).id.clone()).collect(),
        total_duration: segments.iter().map(|s| s.total_duration).sum(),
        total_cost: segments.iter().map(|s| s.total_cost).sum(),
        transfers: segments.iter().map(|s| s.transfers).sum(),
        segments,
    })
}

/// Greedy visiting order: always hop to the closest unvisited destination
fn nearest_neighbor_order(
    graph: &TransitGraph,
    origin: NodeIdx,
    mut remaining: Vec<NodeIdx>,
) -> Vec<NodeIdx> {
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = origin;

    while !remaining.is_empty() {
        let here = graph.node(current).geometry;
        let next = remaining
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = Haversine.distance(here, graph.node(**a).geometry);
                let db = Haversine.distance(here, graph.node(**b).geometry);
                da.total_cmp(&db).then(a.cmp(b))
            })
            .map(|(pos, _)| pos);
        let Some(pos) = next else { break };

        current = remaining.remove(pos);
        order.push(current);
    }

    order
}

/// Validates the criteria and applies the optional region restriction
fn prepare<'g>(
    graph: &'g TransitGraph,
    criteria: &SearchCriteria,
) -> Result<(&'g TransitGraph, Option<TransitGraph>), PlanError> {
    criteria.weighting.validate()?;

    // Absent ids are a bad request, checked against the unfiltered graph so
    // the answer does not depend on the region constraint
    for id in [&criteria.origin, &criteria.destination] {
        if graph.index_of(id).is_none() {
            return Err(PlanError::UnknownNode(id.clone()));
        }
    }

    let restricted = criteria
        .region
        .as_deref()
        .map(|region| graph.restrict_to_region(region));
    Ok((graph, restricted))
}

fn endpoints(
    graph: &TransitGraph,
    criteria: &SearchCriteria,
) -> Result<(NodeIdx, NodeIdx), PlanError> {
    // Nodes pruned by the region filter are structurally absent, not
    // unknown: that is the unified empty-result channel
    match (
        graph.index_of(&criteria.origin),
        graph.index_of(&criteria.destination),
    ) {
        (Some(origin), Some(destination)) => Ok((origin, destination)),
        _ => Err(no_route(criteria)),
    }
}

fn plan_single(graph: &TransitGraph, criteria: &SearchCriteria) -> Result<Itinerary, PlanError> {
    let (origin, destination) = endpoints(graph, criteria)?;
    if origin == destination {
        return Ok(Itinerary::empty());
    }

    let view = GraphView::new(graph).without_modes(criteria.excluded_modes.iter().copied());
    let path = dijkstra::shortest_path(&view, origin, destination, &criteria.weighting)
        .ok_or_else(|| no_route(criteria))?;

    itinerary::format_itinerary(graph, &path)
}

fn no_route(criteria: &SearchCriteria) -> PlanError {
    PlanError::NoRouteFound {
        origin: criteria.origin.clone(),
        destination: criteria.destination.clone(),
    }
}
