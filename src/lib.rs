// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Walking routes over a campus network of hallways, tunnels, bridges, stairs,
//! doors and outdoor walkways.
//!
//! A [GeoJSON](https://geojson.org/) feature collection of georeferenced paths is converted
//! into a multi-floor [Graph], where every vertex is a [Location] - a coordinate on a
//! specific [BuildingFloor]. [find_route] runs Dijkstra's algorithm over that graph,
//! optimizing for one of the [CostFunctions](CostFunction), and returns a [Route]:
//! a merged, human-readable list of segments with turn-by-turn directions.
//!
//! # Example
//!
//! ```no_run
//! let mut g = campusroute::Graph::default();
//! let mut buildings = campusroute::Buildings::default();
//! campusroute::features::add_features_from_file(
//!     &mut g,
//!     &mut buildings,
//!     &campusroute::features::Options::default(),
//!     "path/to/campus.geojson",
//! ).expect("failed to load campus.geojson");
//!
//! let start = buildings.location(&"E6|3".parse().unwrap()).unwrap();
//! let end = buildings.location(&"SLC|1".parse().unwrap()).unwrap();
//! match campusroute::find_route(&g, &start, &end, campusroute::CostFunction::Time) {
//!     Some(route) => {
//!         println!("{}", route.summary());
//!         for step in route.directions() {
//!             println!("{}", step);
//!         }
//!     }
//!     None => println!("no route found"),
//! }
//! ```

mod buildings;
mod dijkstra;
mod distance;
pub mod features;
mod graph;
mod route;

use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub use buildings::Buildings;
pub use dijkstra::{
    find_route, find_route_with_pace, CostFunction, Pace, ParseCostFunctionError, DEFAULT_PACE,
};
pub use distance::earth_distance;
pub use graph::Graph;
pub use route::{collapse_outdoor, merge_same_floor, Badge, Direction, Route, Segment, Summary};

/// Building code of the synthetic [BuildingFloor] which represents the outdoors.
///
/// Doors lead from buildings onto this "floor", and walkways run on it.
/// [Route] post-processing hides it from the directions.
pub const OUTSIDE_BUILDING_CODE: &str = "OUTSIDE";

/// Geographic position, in degrees.
///
/// Equality is exact numeric equality. Coordinates are expected to be finite -
/// the [feature reader](crate::features) rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a Coordinate from a GeoJSON position, which is ordered `[lon, lat]`.
    /// Returns `None` if the position has less than 2 elements or either is not finite.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    /// Returns the `[lon, lat]` GeoJSON position of this Coordinate.
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // NOTE: Adding zero turns -0.0 into 0.0, as both compare equal
        (self.lat + 0.0).to_bits().hash(state);
        (self.lon + 0.0).to_bits().hash(state);
    }
}

/// Identifies a single floor of a building.
///
/// Floors are labels, not numbers - "B1", "G" or "2M" are all valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingFloor {
    pub building_code: String,
    pub floor: String,
}

impl BuildingFloor {
    pub fn new<C: Into<String>, F: Into<String>>(building_code: C, floor: F) -> Self {
        Self {
            building_code: building_code.into(),
            floor: floor.into(),
        }
    }

    /// Returns true if this is the synthetic [outdoors](OUTSIDE_BUILDING_CODE) floor.
    pub fn is_outside(&self) -> bool {
        self.building_code == OUTSIDE_BUILDING_CODE
    }

    /// Returns the label used in directions, e.g. "E6 floor 3".
    pub fn direction_label(&self) -> String {
        format!("{} floor {}", self.building_code, self.floor)
    }
}

/// Formats the BuildingFloor as its stable `CODE|FLOOR` key.
impl std::fmt::Display for BuildingFloor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.building_code, self.floor)
    }
}

/// Error returned when parsing a [BuildingFloor] from a `CODE|FLOOR` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid building floor {0:?}: expected CODE|FLOOR")]
pub struct ParseBuildingFloorError(String);

impl FromStr for BuildingFloor {
    type Err = ParseBuildingFloorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('|') {
            Some((code, floor)) if !code.is_empty() && !floor.is_empty() => {
                Ok(Self::new(code, floor))
            }
            _ => Err(ParseBuildingFloorError(s.to_string())),
        }
    }
}

/// A vertex of the [Graph]: a [Coordinate] on a specific [BuildingFloor].
///
/// The same coordinate on two different floors (e.g. a stairwell landing)
/// represents two distinct Locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub coordinate: Coordinate,
    pub building_floor: BuildingFloor,
}

impl Location {
    pub fn new(coordinate: Coordinate, building_floor: BuildingFloor) -> Self {
        Self {
            coordinate,
            building_floor,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.coordinate.lat, self.coordinate.lon, self.building_floor
        )
    }
}

/// Kind of passage represented by an [Edge].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Hallway,
    Tunnel,
    Bridge,
    Door,
    Open,
    Stairs,
    Walkway,
}

impl TravelMode {
    pub const ALL: [TravelMode; 7] = [
        Self::Hallway,
        Self::Tunnel,
        Self::Bridge,
        Self::Door,
        Self::Open,
        Self::Stairs,
        Self::Walkway,
    ];

    /// Returns the lowercase tag of this mode, as used in the input data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hallway => "hallway",
            Self::Tunnel => "tunnel",
            Self::Bridge => "bridge",
            Self::Door => "door",
            Self::Open => "open",
            Self::Stairs => "stairs",
            Self::Walkway => "walkway",
        }
    }

    /// Parses a lowercase tag. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == tag)
    }

    /// Returns true if time spent on this mode counts as time spent outdoors.
    pub fn is_outdoor(self) -> bool {
        self == Self::Walkway
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a directed connection between two [Locations](Location).
///
/// `length` is the horizontal distance in meters and must not be negative.
/// `floor_change` is positive when going up. `path` is the literal geometry
/// of the connection, starting at `from` and ending at `to`; it is
/// only used for drawing and merging route segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: Location,
    pub to: Location,
    pub length: f64,
    pub floor_change: i32,
    pub mode: TravelMode,
    pub path: Vec<Coordinate>,
}

impl Edge {
    /// Returns the same connection in the opposite direction.
    /// Length and mode are preserved, the floor change is negated
    /// and the path is reversed.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            length: self.length,
            floor_change: -self.floor_change,
            mode: self.mode,
            path: self.path.iter().rev().copied().collect(),
        }
    }
}
