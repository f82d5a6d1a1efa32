// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Route, Segment};
use crate::TravelMode;

/// Category of a [Direction], shown as a small label next to the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Outdoor,
    Stairs,
    Bridge,
    Tunnel,
}

impl Badge {
    fn for_mode(mode: TravelMode) -> Option<Self> {
        match mode {
            TravelMode::Walkway => Some(Self::Outdoor),
            TravelMode::Stairs => Some(Self::Stairs),
            TravelMode::Bridge => Some(Self::Bridge),
            TravelMode::Tunnel => Some(Self::Tunnel),
            TravelMode::Hallway | TravelMode::Door | TravelMode::Open => None,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outdoor => write!(f, "Outdoor"),
            Self::Stairs => write!(f, "Stairs"),
            Self::Bridge => write!(f, "Bridge"),
            Self::Tunnel => write!(f, "Tunnel"),
        }
    }
}

/// A single turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub badge: Option<Badge>,
    pub text: String,
}

impl Direction {
    /// Describes how to travel a [Segment]. Returns `None` for the first segment
    /// of a route, which has no travel mode.
    pub fn for_segment(segment: &Segment) -> Option<Self> {
        let mode = segment.travel_mode?;
        let to = segment.location.building_floor.direction_label();

        let text = match mode {
            TravelMode::Open => format!("Continue into {to}"),
            TravelMode::Door => format!("Go through the door to {to}"),
            TravelMode::Stairs => match segment.floor_change {
                0 => format!("Go through the stairwell to {to}"),
                change => format!(
                    "Go {} {} floor{} to {to}",
                    if change > 0 { "up" } else { "down" },
                    change.unsigned_abs(),
                    if change.unsigned_abs() == 1 { "" } else { "s" },
                ),
            },
            TravelMode::Hallway => format!("Take the hallway on {to}"),
            TravelMode::Walkway => format!("Go outside and walk to {to}"),
            TravelMode::Tunnel | TravelMode::Bridge => format!("Take the {mode} to {to}"),
        };

        Some(Self {
            badge: Badge::for_mode(mode),
            text,
        })
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.badge {
            Some(badge) => write!(f, "[{badge}] {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Totals of a whole [Route].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Total travel time, in seconds.
    pub time: f64,

    /// Total distance, in meters.
    pub distance: f64,

    pub floors_ascended: u32,
    pub floors_descended: u32,
}

impl Summary {
    /// Returns the travel time in whole minutes, or "<1" for sub-minute routes.
    pub fn minutes_label(&self) -> String {
        let minutes = self.time / 60.0;
        if minutes < 1.0 {
            "<1".to_string()
        } else {
            format!("{}", minutes.round())
        }
    }

    /// Returns the distance rounded to whole meters.
    pub fn rounded_distance(&self) -> u64 {
        self.distance.round() as u64
    }
}

fn plural_floors(n: u32) -> &'static str {
    if n == 1 {
        "floor"
    } else {
        "floors"
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} min, {} m, {} {} up, {} {} down",
            self.minutes_label(),
            self.rounded_distance(),
            self.floors_ascended,
            plural_floors(self.floors_ascended),
            self.floors_descended,
            plural_floors(self.floors_descended),
        )
    }
}

impl Route {
    /// Returns the instructions for every segment after the start.
    pub fn steps(&self) -> Vec<Direction> {
        self.segments
            .iter()
            .skip(1)
            .filter_map(Direction::for_segment)
            .collect()
    }

    /// Returns the text of the instructions for every segment after the start.
    pub fn directions(&self) -> Vec<String> {
        self.steps().into_iter().map(|d| d.text).collect()
    }

    /// Returns the totals of the route, taken from its last segment.
    pub fn summary(&self) -> Summary {
        let end = self.end();
        Summary {
            time: end.time,
            distance: end.distance,
            floors_ascended: end.floors_ascended,
            floors_descended: end.floors_descended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildingFloor, Coordinate, Location};

    fn segment(mode: Option<TravelMode>, code: &str, floor: &str, floor_change: i32) -> Segment {
        let location = Location::new(Coordinate::new(0.0, 0.0), BuildingFloor::new(code, floor));
        Segment {
            travel_mode: mode,
            floor_change,
            ..Segment::start(location)
        }
    }

    fn text(mode: TravelMode, floor_change: i32) -> String {
        Direction::for_segment(&segment(Some(mode), "E6", "3", floor_change))
            .unwrap()
            .text
    }

    #[test]
    fn direction_templates() {
        assert_eq!(text(TravelMode::Open, 0), "Continue into E6 floor 3");
        assert_eq!(text(TravelMode::Door, 0), "Go through the door to E6 floor 3");
        assert_eq!(text(TravelMode::Stairs, 1), "Go up 1 floor to E6 floor 3");
        assert_eq!(text(TravelMode::Stairs, -2), "Go down 2 floors to E6 floor 3");
        assert_eq!(text(TravelMode::Stairs, 0), "Go through the stairwell to E6 floor 3");
        assert_eq!(text(TravelMode::Hallway, 0), "Take the hallway on E6 floor 3");
        assert_eq!(text(TravelMode::Walkway, 0), "Go outside and walk to E6 floor 3");
        assert_eq!(text(TravelMode::Tunnel, 0), "Take the tunnel to E6 floor 3");
        assert_eq!(text(TravelMode::Bridge, 0), "Take the bridge to E6 floor 3");
    }

    #[test]
    fn badges() {
        let walkway = Direction::for_segment(&segment(Some(TravelMode::Walkway), "E6", "3", 0));
        assert_eq!(walkway.as_ref().unwrap().badge, Some(Badge::Outdoor));
        assert_eq!(
            walkway.unwrap().to_string(),
            "[Outdoor] Go outside and walk to E6 floor 3"
        );

        let hallway = Direction::for_segment(&segment(Some(TravelMode::Hallway), "E6", "3", 0));
        assert_eq!(hallway.unwrap().badge, None);
    }

    #[test]
    fn start_segment_has_no_direction() {
        assert_eq!(Direction::for_segment(&segment(None, "E6", "3", 0)), None);
    }

    #[test]
    fn route_directions_skip_start() {
        let route = Route::new(vec![
            segment(None, "E6", "1", 0),
            segment(Some(TravelMode::Stairs), "E6", "3", 2),
            segment(Some(TravelMode::Door), "E7", "3", 0),
        ]);
        assert_eq!(
            route.directions(),
            vec![
                "Go up 2 floors to E6 floor 3".to_string(),
                "Go through the door to E7 floor 3".to_string(),
            ]
        );
        assert_eq!(route.steps()[0].badge, Some(Badge::Stairs));
    }

    #[test]
    fn summary_labels() {
        let short = Summary {
            time: 59.0,
            distance: 12.4,
            floors_ascended: 0,
            floors_descended: 1,
        };
        assert_eq!(short.minutes_label(), "<1");
        assert_eq!(short.to_string(), "<1 min, 12 m, 0 floors up, 1 floor down");

        let long = Summary {
            time: 750.0,
            distance: 839.6,
            floors_ascended: 2,
            floors_descended: 0,
        };
        assert_eq!(long.minutes_label(), "13");
        assert_eq!(long.rounded_distance(), 840);
        assert_eq!(long.to_string(), "13 min, 840 m, 2 floors up, 0 floors down");
    }
}
