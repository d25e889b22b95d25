//! Shortest-time queries over the rail graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::domain::{Coord, StationCode, walk_seconds};

use super::graph::{NodeId, RailGraph};

/// Shortest travel time from `start` to `goal` in seconds.
///
/// Dijkstra with early exit once the goal is settled. Returns `Some(0)`
/// when `start == goal` and `None` when the goal is unreachable.
pub fn shortest_seconds(graph: &RailGraph, start: NodeId, goal: NodeId) -> Option<u32> {
    if start == goal {
        return Some(0);
    }
    if start >= graph.node_count() || goal >= graph.node_count() {
        return None;
    }

    let mut dist = vec![u32::MAX; graph.node_count()];
    let mut settled = vec![false; graph.node_count()];
    let mut heap = BinaryHeap::new();

    dist[start] = 0;
    heap.push(Reverse((0u32, start)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if settled[u] {
            continue;
        }
        if u == goal {
            return Some(d);
        }
        settled[u] = true;

        for edge in graph.neighbors(u) {
            let nd = d.saturating_add(edge.secs);
            if nd < dist[edge.to] {
                dist[edge.to] = nd;
                heap.push(Reverse((nd, edge.to)));
            }
        }
    }

    None
}

/// Shortest travel time between two stop ids.
pub fn shortest_between(graph: &RailGraph, from: &str, to: &str) -> Option<u32> {
    shortest_seconds(graph, graph.node(from)?, graph.node(to)?)
}

/// The cheapest way through the rail network between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationRoute {
    pub board: NodeId,
    pub alight: NodeId,
    pub walk_in_secs: u32,
    pub ride_secs: u32,
    pub walk_out_secs: u32,
}

impl StationRoute {
    /// Door-to-door seconds, including the platform wait. Saturates at
    /// `u32::MAX`.
    pub fn total_secs(&self, wait_secs: u32) -> u32 {
        self.walk_in_secs
            .saturating_add(wait_secs)
            .saturating_add(self.ride_secs)
            .saturating_add(self.walk_out_secs)
    }
}

/// Best route from `origin` via station `from` to station `to` and on to
/// `destination`, trying every platform combination.
///
/// Each combination costs walk-in + wait + ride + walk-out; the cheapest
/// wins. `None` if either station is unknown or no platform pair connects.
pub fn best_station_route(
    graph: &RailGraph,
    origin: &Coord,
    from: &StationCode,
    destination: &Coord,
    to: &StationCode,
    walk_speed_mps: f64,
    wait_secs: u32,
) -> Option<StationRoute> {
    let mut best: Option<StationRoute> = None;

    for &board in graph.platforms_at(from) {
        let walk_in_secs = walk_seconds(origin, &graph.platform(board).coord, walk_speed_mps);
        for &alight in graph.platforms_at(to) {
            let Some(ride_secs) = shortest_seconds(graph, board, alight) else {
                continue;
            };
            let candidate = StationRoute {
                board,
                alight,
                walk_in_secs,
                ride_secs,
                walk_out_secs: walk_seconds(
                    &graph.platform(alight).coord,
                    destination,
                    walk_speed_mps,
                ),
            };
            if best.is_none_or(|b| candidate.total_secs(wait_secs) < b.total_secs(wait_secs)) {
                best = Some(candidate);
            }
        }
    }

    best
}
