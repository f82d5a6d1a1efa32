// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::cost::{compare_keys, CostFunction, Pace, DEFAULT_PACE};
use crate::{Edge, Graph, Location, Route, Segment};

/// Visited [Segment] with a link to the label it was reached from.
#[derive(Debug)]
struct Label {
    segment: Segment,
    prev: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    key: (f64, f64),
    seq: usize,
    label: usize,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower keys are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap. Ties go to the item pushed first.
        compare_keys(other.key, self.key).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Creates the [Segment] reached by following `edge` from `prev`.
fn follow(prev: &Segment, edge: &Edge, pace: &Pace) -> Segment {
    let step_time = pace.edge_time(edge);
    Segment {
        location: edge.to.clone(),
        travel_mode: Some(edge.mode),
        path: edge.path.clone(),
        distance: prev.distance + edge.length,
        time: prev.time + step_time,
        time_outside: prev.time_outside + if edge.mode.is_outdoor() { step_time } else { 0.0 },
        floor_change: edge.floor_change,
        floors_ascended: prev.floors_ascended + edge.floor_change.max(0).unsigned_abs(),
        floors_descended: prev.floors_descended + edge.floor_change.min(0).unsigned_abs(),
    }
}

/// Walks the `prev` links back from the last label, returning
/// the segments in the start-to-end order.
fn reconstruct_chain(mut labels: Vec<Option<Label>>, last: usize) -> Vec<Segment> {
    let mut chain = Vec::new();
    let mut curr = Some(last);

    while let Some(idx) = curr {
        let label = labels[idx]
            .take()
            .expect("labels on the chain are visited exactly once");
        chain.push(label.segment);
        curr = label.prev;
    }

    chain.reverse();
    return chain;
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the best route between two locations, as per the provided [CostFunction],
/// assuming the [DEFAULT_PACE].
///
/// Returns `None` if there is no route between the two locations.
/// If `from == to`, returns a [Route] with only the starting segment.
pub fn find_route(g: &Graph, from: &Location, to: &Location, cost: CostFunction) -> Option<Route> {
    find_route_with_pace(g, from, to, cost, &DEFAULT_PACE)
}

/// Same as [find_route], but travel times are computed with the provided [Pace].
///
/// All search state is local to the call, so multiple searches may run
/// concurrently over a shared [Graph].
pub fn find_route_with_pace(
    g: &Graph,
    from: &Location,
    to: &Location,
    cost: CostFunction,
    pace: &Pace,
) -> Option<Route> {
    debug_assert!(pace.walking_speed.is_normal() && pace.walking_speed > 0.0);

    let mut labels: Vec<Option<Label>> = Vec::new();
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut known_costs: HashMap<&Location, (f64, f64)> = HashMap::default();
    let mut seq: usize = 0;
    let mut expanded: usize = 0;

    {
        let start = Segment::start(from.clone());
        let key = cost.key(&start);
        labels.push(Some(Label {
            segment: start,
            prev: None,
        }));
        queue.push(QueueItem { key, seq, label: 0 });
        known_costs.insert(from, key);
    }

    while let Some(item) = queue.pop() {
        let at = &labels[item.label]
            .as_ref()
            .expect("labels in the queue are not yet consumed")
            .segment;

        if &at.location == to {
            log::debug!(
                "route {} → {} found after expanding {} labels ({})",
                from,
                to,
                expanded,
                cost,
            );
            return Some(Route::new(reconstruct_chain(labels, item.label)));
        }

        // We might keep multiple items in the queue for the same location - skip outdated ones.
        let known = known_costs.get(&at.location).copied();
        if known.is_some_and(|k| compare_keys(item.key, k) == Ordering::Greater) {
            continue;
        }

        expanded += 1;

        let mut reached: Vec<Segment> = Vec::new();
        for edge in g.get_edges(&at.location) {
            let next = follow(at, edge, pace);
            let next_key = cost.key(&next);

            // Check if this is the cheapest way to the neighbor
            let is_better = known_costs
                .get(&edge.to)
                .map_or(true, |&k| compare_keys(next_key, k) == Ordering::Less);

            if is_better {
                known_costs.insert(&edge.to, next_key);
                reached.push(next);
            }
        }

        for next in reached {
            seq += 1;
            let key = cost.key(&next);
            labels.push(Some(Label {
                segment: next,
                prev: Some(item.label),
            }));
            queue.push(QueueItem {
                key,
                seq,
                label: labels.len() - 1,
            });
        }
    }

    log::debug!(
        "no route {} → {} after expanding {} labels",
        from,
        to,
        expanded
    );
    return None;
}
