// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{BuildingFloor, Coordinate, Location};
use std::collections::BTreeMap;

/// Catalog of buildings which can be used as route endpoints.
///
/// Every building has a list of floors, and every floor has a reference point -
/// a [Location] from which routes start or at which they end. A building may be
/// described by multiple features, e.g. when its upper floors are entered at a
/// different spot than the ground floor.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buildings(BTreeMap<String, BTreeMap<String, Coordinate>>);

impl Buildings {
    /// Returns the number of buildings in the catalog.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no buildings in the catalog.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds floors of a building, reachable at a given coordinate.
    ///
    /// Floors which were already known are moved to the new coordinate.
    pub fn insert<C, I, F>(&mut self, building_code: C, coordinate: Coordinate, floors: I)
    where
        C: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let building = self.0.entry(building_code.into()).or_default();
        for floor in floors {
            building.insert(floor.into(), coordinate);
        }
    }

    /// Returns the reference [Location] of a building floor,
    /// or `None` if the building or the floor is not known.
    pub fn location(&self, building_floor: &BuildingFloor) -> Option<Location> {
        self.0
            .get(&building_floor.building_code)
            .and_then(|floors| floors.get(&building_floor.floor))
            .map(|&coordinate| Location::new(coordinate, building_floor.clone()))
    }

    /// Returns an iterator over all building codes, in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over all floors of a building, in sorted order.
    /// Unknown buildings have no floors.
    pub fn floors<'a>(&'a self, building_code: &str) -> impl Iterator<Item = &'a str> {
        self.0
            .get(building_code)
            .into_iter()
            .flat_map(|floors| floors.keys().map(String::as_str))
    }

    /// Returns an iterator over every known building floor, in sorted order.
    pub fn building_floors(&self) -> impl Iterator<Item = BuildingFloor> + '_ {
        self.0.iter().flat_map(|(code, floors)| {
            floors
                .keys()
                .map(move |floor| BuildingFloor::new(code.as_str(), floor.as_str()))
        })
    }
}
