// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod directions;
mod export;

use crate::{Coordinate, Location, TravelMode};

pub use directions::{Badge, Direction, Summary};

/// A single step of a [Route]: how a [Location] was reached, and the
/// cumulative costs of the whole route up to that location.
///
/// During the search, Segments act as labels of visited locations;
/// after post-processing, one Segment may span many graph edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Where this segment ends.
    pub location: Location,

    /// Kind of passage used to reach [Segment::location].
    /// `None` only for the first segment of a route.
    pub travel_mode: Option<TravelMode>,

    /// Geometry of this segment, from the end of the previous segment to
    /// [Segment::location]. The first segment of a route has a single point.
    pub path: Vec<Coordinate>,

    /// Total distance travelled since the start of the route, in meters.
    pub distance: f64,

    /// Total time travelled since the start of the route, in seconds.
    pub time: f64,

    /// Total time spent outdoors since the start of the route, in seconds.
    pub time_outside: f64,

    /// Number of floors gone up (positive) or down (negative) in this segment.
    pub floor_change: i32,

    /// Total number of floors ascended since the start of the route.
    pub floors_ascended: u32,

    /// Total number of floors descended since the start of the route.
    pub floors_descended: u32,
}

impl Segment {
    /// Creates the zero-cost, zero-length first segment of a route.
    pub fn start(location: Location) -> Self {
        Self {
            path: vec![location.coordinate],
            location,
            travel_mode: None,
            distance: 0.0,
            time: 0.0,
            time_outside: 0.0,
            floor_change: 0,
            floors_ascended: 0,
            floors_descended: 0,
        }
    }

    fn is_on_same_floor(&self, other: &Segment) -> bool {
        self.location.building_floor == other.location.building_floor
    }

    fn is_door_to_outside(&self) -> bool {
        self.travel_mode == Some(TravelMode::Door) && self.location.building_floor.is_outside()
    }
}

/// The final, post-processed route between two locations.
///
/// Segments are ordered from the start to the end. The first segment
/// never has a [travel mode](Segment::travel_mode) and its path is the
/// starting point.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<Segment>,
}

impl Route {
    /// Creates a route from the chain of segments visited by the search
    /// (ordered from start to end), running [merge_same_floor] and [collapse_outdoor] over it.
    ///
    /// # Panics
    ///
    /// Panics if `chain` is empty; every route has at least its start segment.
    pub fn new(chain: Vec<Segment>) -> Self {
        assert!(!chain.is_empty(), "a route needs at least the start segment");
        debug_assert!(chain[0].travel_mode.is_none() && chain[0].path.len() == 1);

        let segments = collapse_outdoor(merge_same_floor(chain));
        Self { segments }
    }

    /// Returns all segments of the route, including the starting one.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the first (zero-length) segment of the route.
    pub fn start(&self) -> &Segment {
        &self.segments[0]
    }

    /// Returns the last segment of the route, holding the route totals.
    pub fn end(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Returns the number of segments, including the starting one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the route has no movement - the start is the end.
    pub fn is_empty(&self) -> bool {
        self.segments.len() <= 1
    }
}

/// Concatenates two paths, where `b` starts at the last point of `a`.
fn join_paths(a: &[Coordinate], b: &[Coordinate]) -> Vec<Coordinate> {
    let mut joined = Vec::with_capacity(a.len() + b.len());
    joined.extend_from_slice(a);
    joined.extend_from_slice(b.get(1..).unwrap_or_default());
    joined
}

/// Merges consecutive segments made on the same floor using the same travel mode.
///
/// Given segments A, B and C, all on the same building-floor, with B and C
/// sharing the travel mode, B and C are replaced by a single segment ending at C,
/// with the costs of C and the combined paths of B and C.
///
/// The operation is idempotent.
pub fn merge_same_floor(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for curr in segments {
        let n = merged.len();
        let can_merge = n >= 2
            && merged[n - 2].is_on_same_floor(&merged[n - 1])
            && merged[n - 1].is_on_same_floor(&curr)
            && merged[n - 1].travel_mode == curr.travel_mode;

        if can_merge {
            let prev = &mut merged[n - 1];
            let path = join_paths(&prev.path, &curr.path);
            *prev = Segment { path, ..curr };
        } else {
            merged.push(curr);
        }
    }

    merged
}

/// Hides the synthetic [outdoors floor](crate::OUTSIDE_BUILDING_CODE) from a route.
///
/// Every door-walkway-door sequence, where the first door leads outside and
/// the second door leads back inside, is replaced by a single
/// [walkway](TravelMode::Walkway) segment with the costs of the second door.
///
/// Run this after [merge_same_floor], which turns consecutive walkways into one segment.
/// Leaving the outdoors in any other way is a data error; this panics in debug builds
/// and leaves such sequences untouched otherwise.
pub fn collapse_outdoor(segments: Vec<Segment>) -> Vec<Segment> {
    let mut collapsed: Vec<Segment> = Vec::with_capacity(segments.len());

    for curr in segments {
        collapsed.push(curr);

        let n = collapsed.len();
        if n < 2 || !leaves_outside(&collapsed[n - 2], &collapsed[n - 1]) {
            continue;
        }

        let matches_pattern = n >= 3
            && collapsed[n - 3].is_door_to_outside()
            && collapsed[n - 2].travel_mode == Some(TravelMode::Walkway)
            && collapsed[n - 1].travel_mode == Some(TravelMode::Door);

        if matches_pattern {
            let entry_door = collapsed.pop().expect("n >= 3");
            let walkway = collapsed.pop().expect("n >= 3");
            let exit_door = collapsed.pop().expect("n >= 3");

            let path = join_paths(&join_paths(&exit_door.path, &walkway.path), &entry_door.path);
            let floor_change =
                exit_door.floor_change + walkway.floor_change + entry_door.floor_change;
            collapsed.push(Segment {
                travel_mode: Some(TravelMode::Walkway),
                path,
                floor_change,
                ..entry_door
            });
        } else if collapsed[..n - 1]
            .iter()
            .any(|s| !s.location.building_floor.is_outside())
        {
            // The route went outside during the trip, but not through a door-walkway-door
            debug_assert!(
                false,
                "unexpected way of leaving the outdoors at {}",
                collapsed[n - 1].location,
            );
            log::warn!(
                "unexpected way of leaving the outdoors at {} - keeping the raw segments",
                collapsed[n - 1].location,
            );
        }
    }

    collapsed
}

fn leaves_outside(prev: &Segment, curr: &Segment) -> bool {
    prev.location.building_floor.is_outside() && !curr.location.building_floor.is_outside()
}
