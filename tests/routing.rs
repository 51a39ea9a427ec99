//! End-to-end planning tests over a small Jakarta-flavored fact set

use mobigraph::prelude::*;

fn stop(store: &mut TripleStore, id: &str, name: &str, coords: &str, region: &str, modes: &[&str]) {
    store.insert(Triple::new(id, vocab::TYPE, vocab::STOP));
    store.insert(Triple::new(id, vocab::NAME, name));
    store.insert(Triple::new(id, vocab::HAS_COORDINATES, coords));
    store.insert(Triple::new(id, vocab::HAS_REGION, region));
    for mode in modes {
        store.insert(Triple::new(id, vocab::HAS_MODE, *mode));
    }
}

fn connection(
    store: &mut TripleStore,
    id: &str,
    from: &str,
    to: &str,
    mode: &str,
    time: &str,
    cost: &str,
) {
    store.insert(Triple::new(id, vocab::TYPE, vocab::CONNECTION));
    store.insert(Triple::new(id, vocab::CONNECTS_FROM, from));
    store.insert(Triple::new(id, vocab::CONNECTS_TO, to));
    store.insert(Triple::new(id, vocab::HAS_MODE, mode));
    store.insert(Triple::new(id, vocab::TRAVEL_TIME, time));
    store.insert(Triple::new(id, vocab::COST, cost));
}

/// Monas and Ancol share a region; KotaTua relays between them on a faster
/// two-leg path. PulauSeribu is deliberately unreachable.
fn jakarta_store() -> TripleStore {
    let mut store = TripleStore::new();
    stop(
        &mut store,
        "Monas",
        "Monumen Nasional",
        "-6.1754,106.8272",
        "central",
        &["rail-rapid-transit", "bus-rapid-transit"],
    );
    stop(
        &mut store,
        "KotaTua",
        "Kota Tua",
        "-6.1352,106.8133",
        "old-town",
        &["rail-rapid-transit", "bus-rapid-transit"],
    );
    stop(
        &mut store,
        "Ancol",
        "Taman Impian Jaya Ancol",
        "-6.1266,106.8405",
        "central",
        &["bus-rapid-transit"],
    );
    stop(
        &mut store,
        "PulauSeribu",
        "Kepulauan Seribu",
        "-5.8000,106.5000",
        "islands",
        &["bus-rapid-transit"],
    );
    connection(
        &mut store, "mk", "Monas", "KotaTua", "rail-rapid-transit", "10", "3500",
    );
    connection(
        &mut store, "ka", "KotaTua", "Ancol", "bus-rapid-transit", "15", "3500",
    );
    connection(
        &mut store, "ma", "Monas", "Ancol", "bus-rapid-transit", "40", "3500",
    );
    store
}

fn jakarta_graph() -> TransitGraph {
    build_graph(&jakarta_store(), &GraphConfig::default()).unwrap()
}

fn fastest(origin: &str, destination: &str) -> SearchCriteria {
    SearchCriteria::new(origin, destination).with_weighting(Weighting::time_only())
}

#[test]
fn origin_equals_destination_is_a_zero_leg_itinerary() {
    let graph = jakarta_graph();
    let itinerary = plan_route(&graph, &fastest("Monas", "Monas")).unwrap();

    assert!(itinerary.is_empty());
    assert_eq!(itinerary.total_duration, 0.0);
    assert_eq!(itinerary.total_cost, 0.0);
    assert_eq!(itinerary.transfers, 0);
}

#[test]
fn two_leg_relay_beats_the_direct_edge_on_time() {
    let graph = jakarta_graph();
    let itinerary = plan_route(&graph, &fastest("Monas", "Ancol")).unwrap();

    assert_eq!(itinerary.legs.len(), 2);
    assert_eq!(itinerary.legs[0].to, "KotaTua");
    assert_eq!(itinerary.legs[0].mode, Mode::RailRapidTransit);
    assert_eq!(itinerary.legs[1].mode, Mode::BusRapidTransit);
    assert_eq!(itinerary.total_duration, 25.0);
    assert_eq!(itinerary.total_cost, 7000.0);
}

#[test]
fn region_filter_removes_the_relay_and_falls_back_to_the_direct_edge() {
    let graph = jakarta_graph();
    let criteria = fastest("Monas", "Ancol").in_region("central");
    let itinerary = plan_route(&graph, &criteria).unwrap();

    assert_eq!(itinerary.legs.len(), 1);
    assert_eq!(itinerary.total_duration, 40.0);
}

#[test]
fn repeated_searches_are_byte_identical() {
    let graph = jakarta_graph();
    let criteria = SearchCriteria::new("Monas", "Ancol");

    let first = serde_json::to_string(&plan_route(&graph, &criteria).unwrap()).unwrap();
    let second = serde_json::to_string(&plan_route(&graph, &criteria).unwrap()).unwrap();
    assert_eq!(first, second);

    // Rebuilding from the same facts changes nothing either
    let rebuilt = build_graph(&jakarta_store(), &GraphConfig::default()).unwrap();
    let third = serde_json::to_string(&plan_route(&rebuilt, &criteria).unwrap()).unwrap();
    assert_eq!(first, third);
}

#[test]
fn absent_id_is_a_bad_request_not_a_missing_route() {
    let graph = jakarta_graph();

    let err = plan_route(&graph, &fastest("Monas", "Atlantis")).unwrap_err();
    assert_eq!(err, PlanError::UnknownNode("Atlantis".to_string()));

    let err = plan_route(&graph, &fastest("Monas", "PulauSeribu")).unwrap_err();
    assert!(matches!(err, PlanError::NoRouteFound { .. }));
}

#[test]
fn region_pruned_endpoint_reports_no_route() {
    let graph = jakarta_graph();
    // KotaTua exists in the base graph but not inside "central"
    let criteria = fastest("KotaTua", "Ancol").in_region("central");
    let err = plan_route(&graph, &criteria).unwrap_err();
    assert!(matches!(err, PlanError::NoRouteFound { .. }));
}

#[test]
fn mode_exclusion_reroutes_without_touching_the_graph() {
    let graph = jakarta_graph();
    let criteria = fastest("Monas", "Ancol").without_mode(Mode::RailRapidTransit);
    let itinerary = plan_route(&graph, &criteria).unwrap();

    // The rail leg to KotaTua is hidden, so only the direct bus remains
    assert_eq!(itinerary.legs.len(), 1);
    assert_eq!(itinerary.legs[0].mode, Mode::BusRapidTransit);
    assert_eq!(itinerary.total_duration, 40.0);

    // The base graph still answers the unrestricted query as before
    let unrestricted = plan_route(&graph, &fastest("Monas", "Ancol")).unwrap();
    assert_eq!(unrestricted.total_duration, 25.0);
}

#[test]
fn alternatives_come_back_ranked_and_distinct() {
    let graph = jakarta_graph();
    let itineraries =
        plan_alternatives(&graph, &fastest("Monas", "Ancol"), MAX_ALTERNATIVES).unwrap();

    assert_eq!(itineraries.len(), 2);
    assert_eq!(itineraries[0].total_duration, 25.0);
    assert_eq!(itineraries[1].total_duration, 40.0);
}

#[test]
fn tour_visits_the_nearer_destination_first_and_chains_segments() {
    let graph = jakarta_graph();
    // KotaTua is closer to Monas than Ancol, so the tour relays through it
    let criteria =
        TourCriteria::new("Monas", ["Ancol", "KotaTua"]).with_weighting(Weighting::time_only());
    let tour = plan_tour(&graph, &criteria).unwrap();

    assert_eq!(tour.order, vec!["KotaTua".to_string(), "Ancol".to_string()]);
    assert_eq!(tour.segments.len(), 2);
    assert_eq!(tour.segments[0].total_duration, 10.0);
    assert_eq!(tour.segments[1].total_duration, 15.0);
    assert_eq!(tour.total_duration, 25.0);
    assert_eq!(tour.total_cost, 7000.0);
}

#[test]
fn tour_collapses_duplicate_destinations() {
    let graph = jakarta_graph();
    let criteria = TourCriteria::new("Monas", ["KotaTua", "KotaTua"])
        .with_weighting(Weighting::time_only());
    let tour = plan_tour(&graph, &criteria).unwrap();

    assert_eq!(tour.order, vec!["KotaTua".to_string()]);
    assert_eq!(tour.segments.len(), 1);
}

#[test]
fn tour_rejects_an_empty_destination_set() {
    let graph = jakarta_graph();
    let criteria = TourCriteria::new("Monas", Vec::<String>::new());
    assert!(matches!(
        plan_tour(&graph, &criteria),
        Err(PlanError::InvalidCriteria(_))
    ));
}

#[test]
fn tour_with_an_absent_destination_is_a_bad_request() {
    let graph = jakarta_graph();
    let criteria = TourCriteria::new("Monas", ["Atlantis"]);
    assert_eq!(
        plan_tour(&graph, &criteria).unwrap_err(),
        PlanError::UnknownNode("Atlantis".to_string())
    );
}

#[test]
fn invalid_weighting_is_rejected_before_searching() {
    let graph = jakarta_graph();
    let mut criteria = SearchCriteria::new("Monas", "Ancol");
    criteria.weighting = Weighting {
        time: 0.9,
        cost: 0.9,
        transfer: 0.9,
    };
    assert!(matches!(
        plan_route(&graph, &criteria),
        Err(PlanError::InvalidCriteria(_))
    ));
}

#[test]
fn transfer_weight_steers_around_walking_transfers() {
    let mut store = TripleStore::new();
    stop(&mut store, "A", "A", "-6.20,106.80", "r", &["light-rail"]);
    stop(&mut store, "B", "B", "-6.21,106.81", "r", &["bus-rapid-transit"]);
    stop(&mut store, "C", "C", "-6.22,106.82", "r", &["bus-rapid-transit"]);
    // Fast path with a walking transfer at B, slower transfer-free direct
    connection(&mut store, "ab", "A", "B", "walking-transfer", "5", "0");
    connection(&mut store, "bc", "B", "C", "bus-rapid-transit", "5", "3500");
    connection(&mut store, "ac", "A", "C", "light-rail", "30", "3500");
    let graph = build_graph(&store, &GraphConfig::default()).unwrap();

    let fast = plan_route(&graph, &fastest("A", "C")).unwrap();
    assert_eq!(fast.transfers, 1);
    assert_eq!(fast.total_duration, 10.0);

    let lazy_criteria = SearchCriteria::new("A", "C")
        .with_weighting(Weighting::new(0.1, 0.0, 0.9).unwrap());
    let lazy = plan_route(&graph, &lazy_criteria).unwrap();
    assert_eq!(lazy.transfers, 0);
    assert_eq!(lazy.legs.len(), 1);
}

#[test]
fn derived_transfers_bridge_modes_without_transfer_facts() {
    let mut store = TripleStore::new();
    // Rail terminus and a bus stop ~220m apart, plus the bus onward leg
    stop(&mut store, "RailEnd", "Rail End", "-6.2000,106.8000", "r", &["rail-rapid-transit"]);
    stop(&mut store, "BusStart", "Bus Start", "-6.2000,106.8020", "r", &["bus-rapid-transit"]);
    stop(&mut store, "Beach", "Beach", "-6.1900,106.8100", "r", &["bus-rapid-transit"]);
    connection(&mut store, "bb", "BusStart", "Beach", "bus-rapid-transit", "12", "3500");

    let config = GraphConfig {
        derive_transfers: true,
        ..GraphConfig::default()
    };
    let graph = build_graph(&store, &config).unwrap();
    let itinerary = plan_route(&graph, &fastest("RailEnd", "Beach")).unwrap();

    assert_eq!(itinerary.legs.len(), 2);
    assert!(itinerary.legs[0].is_transfer);
    assert_eq!(itinerary.legs[0].mode, Mode::WalkingTransfer);
    assert_eq!(itinerary.transfers, 1);
}

#[test]
fn planner_result_is_optimal_among_all_simple_paths() {
    let graph = jakarta_graph();
    let weighting = Weighting::default();
    let refs = graph.weight_refs();

    // Brute-force every simple path Monas -> Ancol and compare weights
    fn explore(
        graph: &TransitGraph,
        node: NodeIdx,
        target: NodeIdx,
        visited: &mut Vec<NodeIdx>,
        weight: f64,
        weighting: &Weighting,
        refs: mobigraph::model::WeightRefs,
        best: &mut f64,
    ) {
        if node == target {
            *best = best.min(weight);
            return;
        }
        for edge in graph.out_edges(node) {
            if visited.contains(&edge.target) {
                continue;
            }
            let step = weighting.time * (edge.time / refs.max_time)
                + weighting.cost * (edge.cost / refs.max_cost)
                + weighting.transfer * f64::from(u8::from(edge.is_transfer));
            visited.push(edge.target);
            explore(graph, edge.target, target, visited, weight + step, weighting, refs, best);
            visited.pop();
        }
    }

    let origin = graph.index_of("Monas").unwrap();
    let target = graph.index_of("Ancol").unwrap();
    let mut best = f64::INFINITY;
    explore(
        &graph,
        origin,
        target,
        &mut vec![origin],
        0.0,
        &weighting,
        refs,
        &mut best,
    );

    let criteria = SearchCriteria::new("Monas", "Ancol");
    let itinerary = plan_route(&graph, &criteria).unwrap();
    let planned = weighting.time * (itinerary.total_duration / refs.max_time)
        + weighting.cost * (itinerary.total_cost / refs.max_cost)
        + weighting.transfer * itinerary.transfers as f64;

    assert!(planned <= best + 1e-9);
}

#[test]
fn in_flight_snapshots_survive_a_swap() {
    let handle = GraphHandle::new(jakarta_graph());
    let held = handle.current();

    // Facts change: the relay station closes
    let mut store = jakarta_store();
    store.insert(Triple::new("ma", vocab::ON_LINE, "TJ-5"));
    let version = handle.swap(build_graph(&store, &GraphConfig::default()).unwrap());
    assert_eq!(version, 2);

    // The search that started before the swap still sees the old graph
    let old = plan_route(&held.graph, &fastest("Monas", "Ancol")).unwrap();
    assert_eq!(old.total_duration, 25.0);

    let new = plan_route(&handle.current().graph, &fastest("Monas", "Ancol")).unwrap();
    assert_eq!(new.legs.len(), 2);
}
