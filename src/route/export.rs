// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use super::{Direction, Route, Segment};
use crate::Coordinate;

fn geometry(path: &[Coordinate]) -> Geometry {
    match path {
        [point] => Geometry::new(Value::Point(point.to_position())),
        _ => Geometry::new(Value::LineString(
            path.iter().map(|c| c.to_position()).collect(),
        )),
    }
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn segment_feature(index: usize, segment: &Segment) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("index".to_string(), json!(index));
    properties.insert(
        "type".to_string(),
        json!(segment.travel_mode.map(|m| m.as_str())),
    );
    properties.insert(
        "direction".to_string(),
        json!(Direction::for_segment(segment).map(|d| d.text)),
    );
    properties.insert(
        "buildingFloor".to_string(),
        json!(segment.location.building_floor.to_string()),
    );
    properties.insert("distance".to_string(), json!(segment.distance));
    properties.insert("time".to_string(), json!(segment.time));
    feature(geometry(&segment.path), properties)
}

fn endpoint_feature(role: &str, segment: &Segment) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("role".to_string(), json!(role));
    properties.insert(
        "buildingFloor".to_string(),
        json!(segment.location.building_floor.to_string()),
    );
    feature(
        Geometry::new(Value::Point(segment.location.coordinate.to_position())),
        properties,
    )
}

impl Route {
    /// Converts the route into a GeoJSON `FeatureCollection`, suitable for drawing on a map.
    ///
    /// Every segment after the start becomes a `LineString` (or a `Point`, for segments
    /// without horizontal movement, like stairs) with its travel mode and direction.
    /// Two more `Point` features mark the start and the end of the route.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features: Vec<Feature> = self
            .segments
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, segment)| segment_feature(idx, segment))
            .collect();

        features.push(endpoint_feature("start", self.start()));
        features.push(endpoint_feature("end", self.end()));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildingFloor, Location, TravelMode};

    #[test]
    fn route_to_geojson() {
        let start = Location::new(Coordinate::new(43.0, -80.0), BuildingFloor::new("MC", "1"));
        let upstairs = Location::new(start.coordinate, BuildingFloor::new("MC", "2"));
        let end = Location::new(Coordinate::new(43.001, -80.0), BuildingFloor::new("MC", "2"));

        let route = Route::new(vec![
            Segment::start(start.clone()),
            Segment {
                travel_mode: Some(TravelMode::Stairs),
                floor_change: 1,
                floors_ascended: 1,
                time: 15.0,
                ..Segment::start(upstairs)
            },
            Segment {
                travel_mode: Some(TravelMode::Hallway),
                path: vec![start.coordinate, end.coordinate],
                distance: 111.2,
                time: 94.4,
                floors_ascended: 1,
                ..Segment::start(end.clone())
            },
        ]);

        let fc = route.to_geojson();
        assert_eq!(fc.features.len(), 4);

        let stairs = &fc.features[0];
        assert_eq!(
            stairs.geometry.as_ref().unwrap().value,
            Value::Point(vec![-80.0, 43.0])
        );
        assert_eq!(stairs.property("type"), Some(&json!("stairs")));
        assert_eq!(
            stairs.property("direction"),
            Some(&json!("Go up 1 floor to MC floor 2"))
        );

        let hallway = &fc.features[1];
        assert_eq!(
            hallway.geometry.as_ref().unwrap().value,
            Value::LineString(vec![vec![-80.0, 43.0], vec![-80.0, 43.001]])
        );
        assert_eq!(hallway.property("buildingFloor"), Some(&json!("MC|2")));

        assert_eq!(fc.features[2].property("role"), Some(&json!("start")));
        assert_eq!(fc.features[3].property("role"), Some(&json!("end")));
        assert_eq!(
            fc.features[3].geometry.as_ref().unwrap().value,
            Value::Point(vec![-80.0, 43.001])
        );
    }
}
