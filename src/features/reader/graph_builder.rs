// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::distance::polyline_length;
use crate::{BuildingFloor, Buildings, Coordinate, Edge, Graph, Location, TravelMode};

use super::model::{self, StairsConnection};
use super::parse::parse_feature;
use super::Options;

/// Helper object used for converting [campus features](super::model::Feature)
/// into a [Graph] and a [Buildings] catalog.
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    buildings: &'a mut Buildings,
    options: &'a Options,
    ignore_bbox: bool,
    added_edges: usize,
    skipped_features: usize,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(g: &'a mut Graph, buildings: &'a mut Buildings, options: &'a Options) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        Self {
            g,
            buildings,
            options,
            ignore_bbox,
            added_edges: 0,
            skipped_features: 0,
        }
    }

    /// Add all GeoJSON features to the graph. Invalid features are logged and skipped.
    pub(super) fn add_features<I: IntoIterator<Item = geojson::Feature>>(&mut self, features: I) {
        for (idx, f) in features.into_iter().enumerate() {
            let id = f.id.clone();
            match parse_feature(f) {
                Ok(Some(f)) => self.add_feature(f),
                Ok(None) => log::debug!("feature {idx} ({id:?}) is not part of the campus network"),
                Err(e) => {
                    log::warn!("skipping invalid feature {idx} ({id:?}): {e}");
                    self.skipped_features += 1;
                }
            }
        }

        log::debug!(
            "graph has {} locations after adding {} edges ({} features skipped)",
            self.g.len(),
            self.added_edges,
            self.skipped_features,
        );
    }

    fn add_feature(&mut self, f: model::Feature) {
        if !self.is_feature_in_bbox(&f) {
            return;
        }

        match f {
            model::Feature::Line {
                mode,
                start,
                end,
                coordinates,
            } => self.add_line(mode, start, end, coordinates),

            model::Feature::Connector {
                mode,
                start,
                end,
                coordinate,
            } => self.add_connector(mode, start, end, coordinate),

            model::Feature::Stairs {
                coordinate,
                connections,
            } => self.add_stairs(coordinate, &connections),

            model::Feature::Building {
                building_code,
                floors,
                coordinate,
            } => self.buildings.insert(building_code, coordinate, floors),
        }
    }

    fn add_edge(&mut self, edge: Edge) {
        self.g.add_bidirectional_edge(edge);
        self.added_edges += 1;
    }

    fn add_line(
        &mut self,
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinates: Vec<Coordinate>,
    ) {
        if coordinates.len() < 2 {
            log::warn!("{mode} from {start} to {end} has less than 2 coordinates - skipping");
            self.skipped_features += 1;
            return;
        }

        if start != end {
            // Lines between floors are a single edge; intermediate points are only for drawing.
            let from = Location::new(coordinates[0], start);
            let to = Location::new(coordinates[coordinates.len() - 1], end);
            self.add_edge(Edge {
                from,
                to,
                length: polyline_length(&coordinates),
                floor_change: 0,
                mode,
                path: coordinates,
            });
        } else {
            for pair in coordinates.windows(2) {
                self.add_edge(Edge {
                    from: Location::new(pair[0], start.clone()),
                    to: Location::new(pair[1], start.clone()),
                    length: polyline_length(pair),
                    floor_change: 0,
                    mode,
                    path: pair.to_vec(),
                });
            }
        }
    }

    fn add_connector(
        &mut self,
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinate: Coordinate,
    ) {
        self.add_edge(Edge {
            from: Location::new(coordinate, start),
            to: Location::new(coordinate, end),
            length: 0.0,
            floor_change: 0,
            mode,
            path: vec![coordinate],
        });
    }

    fn add_stairs(&mut self, coordinate: Coordinate, connections: &[StairsConnection]) {
        if connections.len() < 2 {
            log::warn!(
                "stairs at {} {} have less than 2 connections - skipping",
                coordinate.lat,
                coordinate.lon,
            );
            self.skipped_features += 1;
            return;
        }

        let mut edges = Vec::with_capacity(connections.len() * (connections.len() - 1) / 2);
        for (i, lower) in connections.iter().enumerate() {
            for upper in &connections[i + 1..] {
                let Some(floor_change) = upper.level.checked_sub(lower.level) else {
                    log::warn!(
                        "stairs at {} {} have an out-of-range level difference between {} and {} - skipping",
                        coordinate.lat,
                        coordinate.lon,
                        lower.building_floor,
                        upper.building_floor,
                    );
                    self.skipped_features += 1;
                    return;
                };

                edges.push(Edge {
                    from: Location::new(coordinate, lower.building_floor.clone()),
                    to: Location::new(coordinate, upper.building_floor.clone()),
                    length: 0.0,
                    floor_change,
                    mode: TravelMode::Stairs,
                    path: vec![coordinate],
                });
            }
        }

        for edge in edges {
            self.add_edge(edge);
        }
    }

    fn is_feature_in_bbox(&self, f: &model::Feature) -> bool {
        if self.ignore_bbox {
            return true;
        }

        match f {
            model::Feature::Line { coordinates, .. } => {
                coordinates.iter().all(|&c| self.is_in_bbox(c))
            }
            model::Feature::Connector { coordinate, .. }
            | model::Feature::Stairs { coordinate, .. }
            | model::Feature::Building { coordinate, .. } => self.is_in_bbox(*coordinate),
        }
    }

    fn is_in_bbox(&self, c: Coordinate) -> bool {
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        c.lat >= min_lat && c.lat <= max_lat && c.lon >= min_lon && c.lon <= max_lon
    }
}
