use geo::Point;
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::info;

use super::config::GraphConfig;
use super::transfers::derive_transfers;
use crate::error::BuildError;
use crate::model::{Edge, Mode, ModeSet, Node, NodeKind, TransitGraph, WeightRefs};
use crate::triples::{TriplePattern, TripleStore, vocab};
use crate::{Minutes, Money, NodeIdx};

/// Compiles a fact set into an immutable transport graph
///
/// Runs three passes: node materialization, edge materialization, adjacency
/// assembly. Nodes are enumerated in sorted id order and edges keep the
/// input fact order, so two builds over the same facts produce identical
/// graphs.
///
/// # Errors
///
/// Any malformed fact aborts the whole build; see [`BuildError`].
pub fn build_graph(store: &TripleStore, config: &GraphConfig) -> Result<TransitGraph, BuildError> {
    let (nodes, node_index) = collect_nodes(store)?;
    let mut edges = collect_edges(store, &nodes, &node_index)?;

    if config.derive_transfers {
        derive_transfers(&nodes, &mut edges, config);
    }

    let weight_refs = WeightRefs::from_edges(edges.iter());
    let graph = TransitGraph::from_parts(nodes, edges, weight_refs);

    info!(
        "Graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn conflict(subject: &str, detail: impl Into<String>) -> BuildError {
    BuildError::ConflictingFact {
        subject: subject.to_string(),
        detail: detail.into(),
    }
}

/// Pass 1: materialize one node per unique `Stop`/`Destination` subject
fn collect_nodes(
    store: &TripleStore,
) -> Result<(Vec<Node>, HashMap<String, NodeIdx>), BuildError> {
    let mut kinds: HashMap<&str, NodeKind> = HashMap::new();

    for triple in store.query(&TriplePattern::any().with_predicate(vocab::TYPE))? {
        let kind = match triple.object.as_str() {
            vocab::STOP => NodeKind::Stop,
            vocab::DESTINATION => NodeKind::Destination,
            _ => continue,
        };
        if let Some(existing) = kinds.insert(triple.subject.as_str(), kind)
            && existing != kind
        {
            return Err(conflict(
                &triple.subject,
                "typed as both Stop and Destination",
            ));
        }
    }

    // Deterministic node enumeration: stable sort on subject id
    let subjects: Vec<&str> = kinds.keys().copied().sorted_unstable().collect();

    let mut nodes = Vec::with_capacity(subjects.len());
    let mut node_index = HashMap::with_capacity(subjects.len());

    for (idx, subject) in subjects.iter().enumerate() {
        let node = materialize_node(store, subject, kinds[subject])?;
        node_index.insert(node.id.clone(), idx);
        nodes.push(node);
    }

    Ok((nodes, node_index))
}

fn materialize_node(
    store: &TripleStore,
    subject: &str,
    kind: NodeKind,
) -> Result<Node, BuildError> {
    let mut name: Option<&str> = None;
    let mut coords: Option<Point<f64>> = None;
    let mut region: Option<&str> = None;
    let mut gateway = false;
    let mut modes = ModeSet::default();

    for triple in store.about(subject) {
        let predicate = triple.predicate.as_str();
        if !vocab::NODE_PREDICATES.contains(&predicate) {
            return Err(BuildError::UnrecognizedPredicate {
                subject: subject.to_string(),
                predicate: predicate.to_string(),
            });
        }
        match predicate {
            vocab::NAME => {
                if let Some(existing) = name
                    && existing != triple.object
                {
                    return Err(conflict(subject, "multiple distinct names"));
                }
                name = Some(&triple.object);
            }
            vocab::HAS_COORDINATES => {
                let parsed = parse_coordinates(subject, &triple.object)?;
                if let Some(existing) = coords
                    && existing != parsed
                {
                    return Err(conflict(subject, "multiple distinct coordinates"));
                }
                coords = Some(parsed);
            }
            vocab::HAS_REGION => {
                if let Some(existing) = region
                    && existing != triple.object
                {
                    return Err(conflict(subject, "multiple distinct regions"));
                }
                region = Some(&triple.object);
            }
            vocab::IS_GATEWAY => match triple.object.as_str() {
                "true" => gateway = true,
                "false" => {}
                other => {
                    return Err(conflict(subject, format!("isGateway must be a boolean, got '{other}'")));
                }
            },
            vocab::HAS_MODE => {
                let mode = Mode::parse(&triple.object)
                    .ok_or_else(|| conflict(subject, format!("unknown mode '{}'", triple.object)))?;
                modes.insert(mode);
            }
            // The type fact was consumed by the enumeration pass
            _ => {}
        }
    }

    let geometry = coords.ok_or_else(|| conflict(subject, "missing hasCoordinates"))?;

    Ok(Node {
        id: subject.to_string(),
        name: name.unwrap_or(subject).to_string(),
        geometry,
        region: region.unwrap_or_default().to_string(),
        modes,
        gateway,
        kind,
    })
}

/// "lat,lon" literal to a geo point (x = longitude, y = latitude)
fn parse_coordinates(subject: &str, raw: &str) -> Result<Point<f64>, BuildError> {
    let parse = |s: &str| -> Result<f64, BuildError> {
        s.trim()
            .parse::<f64>()
            .map_err(|_| conflict(subject, format!("malformed coordinates '{raw}'")))
    };
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| conflict(subject, format!("malformed coordinates '{raw}'")))?;
    Ok(Point::new(parse(lon)?, parse(lat)?))
}

/// Pass 2: materialize edges from `Connection` subjects
///
/// Connections are visited in first-appearance order of their type fact, so
/// the final adjacency lists inherit the input's triple order.
fn collect_edges(
    store: &TripleStore,
    nodes: &[Node],
    node_index: &HashMap<String, NodeIdx>,
) -> Result<Vec<Edge>, BuildError> {
    let pattern = TriplePattern::any()
        .with_predicate(vocab::TYPE)
        .with_object(vocab::CONNECTION);

    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for triple in store.query(&pattern)? {
        if !seen.insert(triple.subject.as_str()) {
            continue;
        }
        edges.push(materialize_edge(store, &triple.subject, nodes, node_index)?);
    }

    Ok(edges)
}

fn materialize_edge(
    store: &TripleStore,
    subject: &str,
    nodes: &[Node],
    node_index: &HashMap<String, NodeIdx>,
) -> Result<Edge, BuildError> {
    let mut source: Option<NodeIdx> = None;
    let mut target: Option<NodeIdx> = None;
    let mut mode: Option<Mode> = None;
    let mut time: Option<Minutes> = None;
    let mut cost: Option<Money> = None;
    let mut line: Option<&str> = None;
    let mut transfer_of: Option<NodeIdx> = None;

    let resolve = |node_id: &str| -> Result<NodeIdx, BuildError> {
        node_index
            .get(node_id)
            .copied()
            .ok_or_else(|| BuildError::DanglingReference {
                connection: subject.to_string(),
                node: node_id.to_string(),
            })
    };

    for triple in store.about(subject) {
        let predicate = triple.predicate.as_str();
        if !vocab::CONNECTION_PREDICATES.contains(&predicate) {
            return Err(BuildError::UnrecognizedPredicate {
                subject: subject.to_string(),
                predicate: predicate.to_string(),
            });
        }
        match predicate {
            vocab::CONNECTS_FROM => source = Some(resolve(&triple.object)?),
            vocab::CONNECTS_TO => target = Some(resolve(&triple.object)?),
            vocab::HAS_MODE => {
                mode = Some(Mode::parse(&triple.object).ok_or_else(|| {
                    conflict(subject, format!("unknown mode '{}'", triple.object))
                })?);
            }
            vocab::TRAVEL_TIME => {
                time = Some(parse_weight(subject, "travelTime", &triple.object)?);
            }
            vocab::COST => cost = Some(parse_weight(subject, "cost", &triple.object)?),
            vocab::ON_LINE => line = Some(&triple.object),
            vocab::IS_TRANSFER_OF => transfer_of = Some(resolve(&triple.object)?),
            // The type fact was consumed by the enumeration pass
            _ => {}
        }
    }

    let source = source.ok_or_else(|| conflict(subject, "missing connectsFrom"))?;
    let target = target.ok_or_else(|| conflict(subject, "missing connectsTo"))?;
    let mode = mode.ok_or_else(|| conflict(subject, "missing hasMode"))?;
    let time = time.ok_or_else(|| conflict(subject, "missing travelTime"))?;
    let cost = cost.ok_or_else(|| conflict(subject, "missing cost"))?;

    if transfer_of.is_some() && mode != Mode::WalkingTransfer {
        return Err(conflict(
            subject,
            format!("isTransferOf requires walking-transfer mode, got '{}'", mode.as_str()),
        ));
    }
    debug_assert!(source < nodes.len() && target < nodes.len());

    Ok(Edge {
        source,
        target,
        mode,
        time,
        cost,
        is_transfer: mode.is_transfer(),
        line: line.map(str::to_string),
    })
}

fn parse_weight(subject: &str, attribute: &'static str, raw: &str) -> Result<f64, BuildError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| conflict(subject, format!("malformed {attribute} '{raw}'")))?;
    if !value.is_finite() {
        return Err(conflict(subject, format!("non-finite {attribute} '{raw}'")));
    }
    if value < 0.0 {
        return Err(BuildError::InvalidWeight {
            subject: subject.to_string(),
            attribute,
            value,
        });
    }
    Ok(value)
}
