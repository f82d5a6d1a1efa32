// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, BuildingFloor, Coordinate, Edge, Location};
use std::collections::HashMap;

/// Adjacency list of a campus pathway network: every [Location] mapped
/// to its outgoing [Edges](Edge).
///
/// Edges are only added through [Graph::add_bidirectional_edge], so for every
/// A→B edge there is a mirrored B→A edge. The graph is meant to be built once
/// (see [crate::features]) and only read afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(HashMap<Location, Vec<Edge>>);

impl Graph {
    /// Returns the number of locations in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all [Locations](Location) in the graph.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.0.keys()
    }

    /// Checks if the location is a vertex of the graph.
    pub fn contains(&self, location: &Location) -> bool {
        self.0.contains_key(location)
    }

    /// Returns the total number of (directed) edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Gets all outgoing [Edges](Edge) from a location.
    /// Unknown locations have no edges.
    pub fn get_edges(&self, from: &Location) -> &[Edge] {
        self.0.get(from).map(|e| e.as_slice()).unwrap_or_default()
    }

    /// Adds an [Edge] and its [reversed](Edge::reversed) counterpart.
    pub fn add_bidirectional_edge(&mut self, edge: Edge) {
        debug_assert!(edge.length >= 0.0);

        let reversed = edge.reversed();
        self.0.entry(edge.from.clone()).or_default().push(edge);
        self.0.entry(reversed.from.clone()).or_default().push(reversed);
    }

    /// Finds the closest [Location] on the given floor to the provided coordinate.
    ///
    /// This function requires computing the distance to every location in the graph,
    /// and is not suitable for repeated lookups on large graphs.
    pub fn find_nearest_location(
        &self,
        coordinate: Coordinate,
        building_floor: &BuildingFloor,
    ) -> Option<&Location> {
        self.0
            .keys()
            .filter(|loc| &loc.building_floor == building_floor)
            .map(|loc| (earth_distance(coordinate, loc.coordinate), loc))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, loc)| loc)
    }
}
