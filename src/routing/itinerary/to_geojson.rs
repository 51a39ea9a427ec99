use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{Itinerary, Leg};
use crate::error::PlanError;
use crate::model::TransitGraph;

impl Itinerary {
    /// Converts the itinerary to a `GeoJSON` `FeatureCollection` for map
    /// display: one `LineString` per leg plus start and end markers
    pub fn to_geojson(&self, graph: &TransitGraph) -> Result<FeatureCollection, PlanError> {
        let mut features = Vec::new();

        for (idx, leg) in self.legs.iter().enumerate() {
            features.push(leg_feature(graph, leg, idx)?);
        }
        if let (Some(first), Some(last)) = (self.legs.first(), self.legs.last()) {
            features.push(marker_feature(graph, &first.from, "start")?);
            features.push(marker_feature(graph, &last.to, "end")?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &TransitGraph) -> Result<String, PlanError> {
        serde_json::to_string(&self.to_geojson(graph)?)
            .map_err(|e| PlanError::InvariantViolation(e.to_string()))
    }
}

fn node_coord(graph: &TransitGraph, id: &str) -> Result<Coord<f64>, PlanError> {
    graph
        .node_by_id(id)
        .map(|node| node.geometry.into())
        .ok_or_else(|| {
            PlanError::InvariantViolation(format!("itinerary references unknown node '{id}'"))
        })
}

fn leg_feature(graph: &TransitGraph, leg: &Leg, leg_idx: usize) -> Result<Feature, PlanError> {
    let mut coords = Vec::with_capacity(leg.via.len() + 2);
    coords.push(node_coord(graph, &leg.from)?);
    for id in &leg.via {
        coords.push(node_coord(graph, id)?);
    }
    coords.push(node_coord(graph, &leg.to)?);

    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": if leg.is_transfer { "transfer" } else { "transit" },
            "leg_index": leg_idx,
            "mode": leg.mode,
            "line": leg.line,
            "from_name": leg.from_name,
            "to_name": leg.to_name,
            "duration": leg.duration,
            "cost": leg.cost,
        }
    });

    Feature::from_json_value(value).map_err(|e| PlanError::InvariantViolation(e.to_string()))
}

fn marker_feature(graph: &TransitGraph, id: &str, kind: &str) -> Result<Feature, PlanError> {
    let coord = node_coord(graph, id)?;
    let geometry = Geometry::new(GeoJsonValue::from(&geo::Point::from(coord)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "marker": kind,
            "node": id,
        }
    });

    Feature::from_json_value(value).map_err(|e| PlanError::InvariantViolation(e.to_string()))
}
