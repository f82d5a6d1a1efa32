// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geojson::{JsonObject, Value};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Feature, StairsConnection};
use crate::{BuildingFloor, Coordinate, TravelMode};

/// Building codes and floors are usually strings, but plain numbers
/// (`"floor": 2`) are accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
}

impl From<Label> for String {
    fn from(l: Label) -> Self {
        match l {
            Label::Text(s) => s,
            Label::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuildingFloor {
    building_code: Label,
    floor: Label,
}

impl From<RawBuildingFloor> for BuildingFloor {
    fn from(raw: RawBuildingFloor) -> Self {
        BuildingFloor::new(raw.building_code, raw.floor)
    }
}

#[derive(Debug, Deserialize)]
struct StartEndProperties {
    start: RawBuildingFloor,
    end: RawBuildingFloor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStairsConnection {
    building_code: Label,
    floor: Label,

    /// Whole number, but often written as a float (`1.0`) by GIS tools.
    level: f64,
}

#[derive(Debug, Deserialize)]
struct StairsProperties {
    #[serde(default)]
    connections: Vec<RawStairsConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuilding {
    building_code: Label,
    #[serde(default)]
    floors: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct BuildingProperties {
    building: RawBuilding,
}

/// Reasons for rejecting a GeoJSON feature.
#[derive(Debug)]
pub(super) enum InvalidFeature {
    MissingGeometry,
    MissingProperties,
    MissingType,
    GeometryMismatch {
        tag: String,
        expected: &'static str,
        got: &'static str,
    },
    InvalidPosition(String),
    InvalidProperties(String, serde_json::Error),
    InvalidLevel(f64),
}

impl std::fmt::Display for InvalidFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "missing geometry"),
            Self::MissingProperties => write!(f, "missing properties"),
            Self::MissingType => write!(f, "missing or non-string 'type' property"),
            Self::GeometryMismatch { tag, expected, got } => {
                write!(f, "{tag} must be a {expected}, got a {got}")
            }
            Self::InvalidPosition(tag) => write!(f, "{tag} has an invalid position"),
            Self::InvalidProperties(tag, err) => write!(f, "invalid {tag} properties: {err}"),
            Self::InvalidLevel(level) => write!(f, "stairs level {level} is not a whole number"),
        }
    }
}

impl std::error::Error for InvalidFeature {}

fn geometry_name(v: &Value) -> &'static str {
    match v {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn expect_point(tag: &str, v: &Value) -> Result<Coordinate, InvalidFeature> {
    match v {
        Value::Point(position) => Coordinate::from_position(position)
            .ok_or_else(|| InvalidFeature::InvalidPosition(tag.to_string())),
        _ => Err(InvalidFeature::GeometryMismatch {
            tag: tag.to_string(),
            expected: "Point",
            got: geometry_name(v),
        }),
    }
}

fn expect_line_string(tag: &str, v: &Value) -> Result<Vec<Coordinate>, InvalidFeature> {
    match v {
        Value::LineString(positions) => positions
            .iter()
            .map(|p| Coordinate::from_position(p))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| InvalidFeature::InvalidPosition(tag.to_string())),
        _ => Err(InvalidFeature::GeometryMismatch {
            tag: tag.to_string(),
            expected: "LineString",
            got: geometry_name(v),
        }),
    }
}

fn stairs_level(level: f64) -> Result<i32, InvalidFeature> {
    let in_range = level >= i32::MIN as f64 && level <= i32::MAX as f64;
    if level.is_finite() && level.fract() == 0.0 && in_range {
        Ok(level as i32)
    } else {
        Err(InvalidFeature::InvalidLevel(level))
    }
}

fn properties_as<T: serde::de::DeserializeOwned>(
    tag: &str,
    properties: JsonObject,
) -> Result<T, InvalidFeature> {
    serde_json::from_value(JsonValue::Object(properties))
        .map_err(|e| InvalidFeature::InvalidProperties(tag.to_string(), e))
}

/// Converts a GeoJSON feature into a campus [Feature].
///
/// Returns `Ok(None)` for features which are not part of the pathway network,
/// like building outlines (polygons) or features with an unknown `type`.
pub(super) fn parse_feature(f: geojson::Feature) -> Result<Option<Feature>, InvalidFeature> {
    let geometry = f.geometry.ok_or(InvalidFeature::MissingGeometry)?.value;
    if matches!(geometry, Value::Polygon(_) | Value::MultiPolygon(_)) {
        return Ok(None);
    }

    let mut properties = f.properties.ok_or(InvalidFeature::MissingProperties)?;
    let tag = match properties.remove("type") {
        Some(JsonValue::String(tag)) => tag,
        _ => return Err(InvalidFeature::MissingType),
    };

    let feature = match TravelMode::from_tag(&tag) {
        Some(
            mode @ (TravelMode::Hallway
            | TravelMode::Tunnel
            | TravelMode::Bridge
            | TravelMode::Walkway),
        ) => {
            let coordinates = expect_line_string(&tag, &geometry)?;
            let p: StartEndProperties = properties_as(&tag, properties)?;
            Feature::Line {
                mode,
                start: p.start.into(),
                end: p.end.into(),
                coordinates,
            }
        }

        Some(mode @ (TravelMode::Door | TravelMode::Open)) => {
            let coordinate = expect_point(&tag, &geometry)?;
            let p: StartEndProperties = properties_as(&tag, properties)?;
            Feature::Connector {
                mode,
                start: p.start.into(),
                end: p.end.into(),
                coordinate,
            }
        }

        Some(TravelMode::Stairs) => {
            let coordinate = expect_point(&tag, &geometry)?;
            let p: StairsProperties = properties_as(&tag, properties)?;
            let connections = p
                .connections
                .into_iter()
                .map(|c| {
                    Ok(StairsConnection {
                        building_floor: BuildingFloor::new(c.building_code, c.floor),
                        level: stairs_level(c.level)?,
                    })
                })
                .collect::<Result<Vec<_>, InvalidFeature>>()?;
            Feature::Stairs {
                coordinate,
                connections,
            }
        }

        None if tag == "building" => {
            let coordinate = expect_point(&tag, &geometry)?;
            let p: BuildingProperties = properties_as(&tag, properties)?;
            Feature::Building {
                building_code: p.building.building_code.into(),
                floors: p.building.floors.into_iter().map(String::from).collect(),
                coordinate,
            }
        }

        None => return Ok(None),
    };

    Ok(Some(feature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(v: JsonValue) -> geojson::Feature {
        serde_json::from_value(v).expect("test feature must be valid GeoJSON")
    }

    #[test]
    fn parse_line() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "bridge",
                "start": {"buildingCode": "E5", "floor": "3"},
                "end": {"buildingCode": "E7", "floor": 3},
            },
            "geometry": {"type": "LineString", "coordinates": [[-80.54, 43.47], [-80.53, 43.48]]},
        }));

        assert_eq!(
            parse_feature(f).unwrap(),
            Some(Feature::Line {
                mode: TravelMode::Bridge,
                start: BuildingFloor::new("E5", "3"),
                end: BuildingFloor::new("E7", "3"),
                coordinates: vec![Coordinate::new(43.47, -80.54), Coordinate::new(43.48, -80.53)],
            })
        );
    }

    #[test]
    fn parse_connector() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "door",
                "start": {"buildingCode": "E5", "floor": "1"},
                "end": {"buildingCode": "OUTSIDE", "floor": "1"},
            },
            "geometry": {"type": "Point", "coordinates": [-80.54, 43.47]},
        }));

        assert_eq!(
            parse_feature(f).unwrap(),
            Some(Feature::Connector {
                mode: TravelMode::Door,
                start: BuildingFloor::new("E5", "1"),
                end: BuildingFloor::new("OUTSIDE", "1"),
                coordinate: Coordinate::new(43.47, -80.54),
            })
        );
    }

    #[test]
    fn parse_stairs() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "stairs",
                "connections": [
                    {"buildingCode": "MC", "floor": "B1", "level": 0},
                    {"buildingCode": "MC", "floor": "1", "level": 1},
                ],
            },
            "geometry": {"type": "Point", "coordinates": [-80.54, 43.47]},
        }));

        assert_eq!(
            parse_feature(f).unwrap(),
            Some(Feature::Stairs {
                coordinate: Coordinate::new(43.47, -80.54),
                connections: vec![
                    StairsConnection {
                        building_floor: BuildingFloor::new("MC", "B1"),
                        level: 0,
                    },
                    StairsConnection {
                        building_floor: BuildingFloor::new("MC", "1"),
                        level: 1,
                    },
                ],
            })
        );

        let without_connections = feature(json!({
            "type": "Feature",
            "properties": {"type": "stairs"},
            "geometry": {"type": "Point", "coordinates": [-80.54, 43.47]},
        }));
        assert_eq!(
            parse_feature(without_connections).unwrap(),
            Some(Feature::Stairs {
                coordinate: Coordinate::new(43.47, -80.54),
                connections: vec![],
            })
        );
    }

    #[test]
    fn parse_stairs_with_float_levels() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "stairs",
                "connections": [
                    {"buildingCode": "MC", "floor": "1", "level": 1.0},
                    {"buildingCode": "MC", "floor": "2", "level": 2.0},
                ],
            },
            "geometry": {"type": "Point", "coordinates": [-80.54, 43.47]},
        }));

        assert_eq!(
            parse_feature(f).unwrap(),
            Some(Feature::Stairs {
                coordinate: Coordinate::new(43.47, -80.54),
                connections: vec![
                    StairsConnection {
                        building_floor: BuildingFloor::new("MC", "1"),
                        level: 1,
                    },
                    StairsConnection {
                        building_floor: BuildingFloor::new("MC", "2"),
                        level: 2,
                    },
                ],
            })
        );
    }

    #[test]
    fn reject_fractional_and_huge_levels() {
        for level in [json!(1.5), json!(1e12), json!(-3e9)] {
            let f = feature(json!({
                "type": "Feature",
                "properties": {
                    "type": "stairs",
                    "connections": [
                        {"buildingCode": "MC", "floor": "1", "level": 0},
                        {"buildingCode": "MC", "floor": "2", "level": level.clone()},
                    ],
                },
                "geometry": {"type": "Point", "coordinates": [-80.54, 43.47]},
            }));
            assert!(
                matches!(parse_feature(f), Err(InvalidFeature::InvalidLevel(_))),
                "level {level} should be rejected"
            );
        }
    }

    #[test]
    fn parse_building() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "building",
                "building": {"buildingCode": "SLC", "floors": ["1", "2", 3]},
            },
            "geometry": {"type": "Point", "coordinates": [-80.5457, 43.4716]},
        }));

        assert_eq!(
            parse_feature(f).unwrap(),
            Some(Feature::Building {
                building_code: "SLC".to_string(),
                floors: vec!["1".to_string(), "2".to_string(), "3".to_string()],
                coordinate: Coordinate::new(43.4716, -80.5457),
            })
        );
    }

    #[test]
    fn ignored_features() {
        let outline = feature(json!({
            "type": "Feature",
            "properties": {"name": "SLC"},
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]},
        }));
        assert!(parse_feature(outline).unwrap().is_none());

        let elevator = feature(json!({
            "type": "Feature",
            "properties": {"type": "elevator"},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
        }));
        assert!(parse_feature(elevator).unwrap().is_none());
    }

    #[test]
    fn invalid_features() {
        let door_as_line = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "door",
                "start": {"buildingCode": "E5", "floor": "1"},
                "end": {"buildingCode": "E6", "floor": "1"},
            },
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
        }));
        assert!(matches!(
            parse_feature(door_as_line),
            Err(InvalidFeature::GeometryMismatch {
                expected: "Point",
                got: "LineString",
                ..
            })
        ));

        let hallway_as_point = feature(json!({
            "type": "Feature",
            "properties": {
                "type": "hallway",
                "start": {"buildingCode": "E5", "floor": "1"},
                "end": {"buildingCode": "E5", "floor": "1"},
            },
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
        }));
        assert!(matches!(
            parse_feature(hallway_as_point),
            Err(InvalidFeature::GeometryMismatch {
                expected: "LineString",
                ..
            })
        ));

        let missing_end = feature(json!({
            "type": "Feature",
            "properties": {"type": "tunnel", "start": {"buildingCode": "E5", "floor": "1"}},
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
        }));
        assert!(matches!(
            parse_feature(missing_end),
            Err(InvalidFeature::InvalidProperties(..))
        ));

        let untyped = feature(json!({
            "type": "Feature",
            "properties": {"type": 5},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
        }));
        assert!(matches!(
            parse_feature(untyped),
            Err(InvalidFeature::MissingType)
        ));

        let no_geometry = feature(json!({
            "type": "Feature",
            "properties": {"type": "door"},
            "geometry": null,
        }));
        assert!(matches!(
            parse_feature(no_geometry),
            Err(InvalidFeature::MissingGeometry)
        ));
    }
}
