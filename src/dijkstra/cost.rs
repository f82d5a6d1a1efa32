// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::str::FromStr;

use crate::{Edge, Segment};

/// Describes how fast a pedestrian moves, used to estimate travel times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pace {
    /// Horizontal walking speed, in meters per second. Must be positive and finite.
    pub walking_speed: f64,

    /// Time needed to go up a single floor, in seconds.
    pub ascend_per_floor: f64,

    /// Time needed to go down a single floor, in seconds.
    pub descend_per_floor: f64,
}

/// [Pace] of an average pedestrian, used by [find_route](crate::find_route).
pub const DEFAULT_PACE: Pace = Pace {
    walking_speed: 1.4,
    ascend_per_floor: 15.0,
    descend_per_floor: 10.0,
};

impl Default for Pace {
    fn default() -> Self {
        DEFAULT_PACE
    }
}

impl Pace {
    /// Returns the time needed to traverse an [Edge], in seconds.
    pub fn edge_time(&self, edge: &Edge) -> f64 {
        let floors = edge.floor_change.unsigned_abs() as f64;
        let vertical = if edge.floor_change > 0 {
            floors * self.ascend_per_floor
        } else {
            floors * self.descend_per_floor
        };
        edge.length / self.walking_speed + vertical
    }
}

/// Criterion optimized by the route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CostFunction {
    /// Minimize the walked distance.
    #[default]
    Distance,

    /// Minimize the travel time, including time spent on stairs.
    Time,

    /// Minimize the time spent outdoors first, and then the total travel time.
    TimeOutsideThenTime,
}

impl CostFunction {
    pub const ALL: [CostFunction; 3] = [Self::Distance, Self::Time, Self::TimeOutsideThenTime];

    /// Returns the human-readable name of the cost function.
    pub fn label(self) -> &'static str {
        match self {
            Self::Distance => "Shortest distance",
            Self::Time => "Shortest time",
            Self::TimeOutsideThenTime => "Least time outside",
        }
    }

    /// Returns the key by which segments are (lexicographically) compared.
    /// Lower is better.
    pub fn key(self, segment: &Segment) -> (f64, f64) {
        match self {
            Self::Distance => (segment.distance, 0.0),
            Self::Time => (segment.time, 0.0),
            Self::TimeOutsideThenTime => (segment.time_outside, segment.time),
        }
    }

    /// Compares two segments by their [key](CostFunction::key).
    pub fn compare(self, a: &Segment, b: &Segment) -> Ordering {
        compare_keys(self.key(a), self.key(b))
    }
}

pub(super) fn compare_keys(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}

impl std::fmt::Display for CostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown [CostFunction].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cost function {0:?} (expected: distance, time or indoors)")]
pub struct ParseCostFunctionError(String);

/// Parses a [CostFunction] from its [label](CostFunction::label) or
/// one of the short names: "distance", "time" and "indoors". Case-insensitive.
impl FromStr for CostFunction {
    type Err = ParseCostFunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "distance" => Ok(Self::Distance),
            "time" => Ok(Self::Time),
            "indoors" | "outside" => Ok(Self::TimeOutsideThenTime),
            _ => Self::ALL
                .into_iter()
                .find(|c| c.label().to_lowercase() == normalized)
                .ok_or_else(|| ParseCostFunctionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildingFloor, Coordinate, Location, TravelMode};

    fn edge(length: f64, floor_change: i32) -> Edge {
        let at = Location::new(Coordinate::default(), BuildingFloor::new("RCH", "1"));
        Edge {
            from: at.clone(),
            to: at,
            length,
            floor_change,
            mode: TravelMode::Hallway,
            path: vec![],
        }
    }

    fn segment(distance: f64, time: f64, time_outside: f64) -> Segment {
        let at = Location::new(Coordinate::default(), BuildingFloor::new("RCH", "1"));
        Segment {
            distance,
            time,
            time_outside,
            ..Segment::start(at)
        }
    }

    #[test]
    fn edge_time() {
        assert_eq!(DEFAULT_PACE.edge_time(&edge(14.0, 0)), 10.0);
        assert_eq!(DEFAULT_PACE.edge_time(&edge(0.0, 2)), 30.0);
        assert_eq!(DEFAULT_PACE.edge_time(&edge(0.0, -3)), 30.0);
        assert_eq!(DEFAULT_PACE.edge_time(&edge(7.0, -1)), 15.0);
    }

    #[test]
    fn keys_are_lexicographic() {
        let near_but_outside = segment(100.0, 80.0, 60.0);
        let far_but_inside = segment(300.0, 220.0, 0.0);

        assert_eq!(
            CostFunction::Distance.compare(&near_but_outside, &far_but_inside),
            Ordering::Less
        );
        assert_eq!(
            CostFunction::Time.compare(&near_but_outside, &far_but_inside),
            Ordering::Less
        );
        assert_eq!(
            CostFunction::TimeOutsideThenTime.compare(&near_but_outside, &far_but_inside),
            Ordering::Greater
        );

        let same_outside_faster = segment(500.0, 200.0, 0.0);
        assert_eq!(
            CostFunction::TimeOutsideThenTime.compare(&same_outside_faster, &far_but_inside),
            Ordering::Less
        );
    }

    #[test]
    fn parse_and_display() {
        for c in CostFunction::ALL {
            assert_eq!(c.to_string().parse::<CostFunction>(), Ok(c));
        }
        assert_eq!("time".parse::<CostFunction>(), Ok(CostFunction::Time));
        assert_eq!(
            "Indoors".parse::<CostFunction>(),
            Ok(CostFunction::TimeOutsideThenTime)
        );
        assert!("fastest".parse::<CostFunction>().is_err());
        assert_eq!(CostFunction::default(), CostFunction::Distance);
    }
}
