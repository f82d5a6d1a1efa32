// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{BuildingFloor, Coordinate, TravelMode};

/// Single floor served by a stairwell.
#[derive(Debug, Clone, PartialEq)]
pub struct StairsConnection {
    pub building_floor: BuildingFloor,

    /// Vertical position of the floor; differences between levels
    /// give the number of floors climbed.
    pub level: i32,
}

/// Union over all understood campus features.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    /// A hallway, tunnel, bridge or walkway, running from the `start` to the `end` floor.
    Line {
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinates: Vec<Coordinate>,
    },

    /// A door or an open passage between two floors at a shared coordinate.
    Connector {
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinate: Coordinate,
    },

    /// A stairwell, connecting every pair of its floors.
    Stairs {
        coordinate: Coordinate,
        connections: Vec<StairsConnection>,
    },

    /// Reference point of a building, on all of the provided floors.
    Building {
        building_code: String,
        floors: Vec<String>,
        coordinate: Coordinate,
    },
}
