//! Rail graph construction.
//!
//! Nodes are platform stops. Arcs come from three places:
//! - consecutive scheduled calls on a rail trip (added in both directions,
//!   since some feeds only publish one direction per line),
//! - transfers between platforms sharing a station code,
//! - a configured walkway between two separately coded stations.
//!
//! Every arc keeps the smallest weight proposed for it. Once built, the
//! graph is frozen into a compressed adjacency list and never mutated.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::domain::{Coord, StationCode};
use crate::feed::{FeedTables, StopTimeRecord};

use super::config::RailConfig;

/// Index of a platform in the graph.
pub type NodeId = usize;

/// A rail platform stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub stop_id: String,
    pub name: String,
    pub coord: Coord,
    pub station: Option<StationCode>,
}

/// An outgoing arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub secs: u32,
}

/// Immutable rail graph.
#[derive(Debug, Clone, Default)]
pub struct RailGraph {
    platforms: Vec<Platform>,
    by_stop_id: HashMap<String, NodeId>,
    /// `edges[offsets[n]..offsets[n + 1]]` are the arcs leaving `n`.
    offsets: Vec<usize>,
    edges: Vec<Edge>,
    stations: HashMap<StationCode, Vec<NodeId>>,
}

impl RailGraph {
    /// Build the graph from decoded feed tables.
    pub fn build(tables: &FeedTables, config: &RailConfig) -> Self {
        let mut builder = GraphBuilder::new();

        for stop in &tables.stops {
            if !stop.stop_id.starts_with(&config.stop_prefix) {
                continue;
            }
            builder.add_platform(Platform {
                stop_id: stop.stop_id.clone(),
                name: stop.name.clone(),
                coord: stop.coord,
                station: StationCode::from_platform_id(&stop.stop_id, &config.stop_prefix),
            });
        }

        let rail_routes: HashSet<&str> = tables
            .routes
            .iter()
            .filter(|r| r.route_type == config.route_type)
            .map(|r| r.route_id.as_str())
            .collect();

        let rail_trips: HashSet<&str> = tables
            .trips
            .iter()
            .filter(|t| rail_routes.contains(t.route_id.as_str()))
            .map(|t| t.trip_id.as_str())
            .collect();

        let mut by_trip: HashMap<&str, Vec<&StopTimeRecord>> = HashMap::new();
        for st in &tables.stop_times {
            if !rail_trips.contains(st.trip_id.as_str()) || builder.node(&st.stop_id).is_none() {
                continue;
            }
            by_trip.entry(st.trip_id.as_str()).or_default().push(st);
        }

        let mut rejected_hops = 0usize;
        for calls in by_trip.values_mut() {
            calls.sort_by_key(|st| st.sequence);
            for pair in calls.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let secs = match a.departure.seconds_until(b.arrival) {
                    Some(s) if s > 0 && s < config.max_hop_secs => s,
                    _ => {
                        rejected_hops += 1;
                        continue;
                    }
                };
                if let (Some(from), Some(to)) = (builder.node(&a.stop_id), builder.node(&b.stop_id))
                {
                    builder.add_edge(from, to, secs);
                    builder.add_edge(to, from, secs);
                }
            }
        }

        builder.add_station_transfers(config.transfer_secs);

        if let Some(walkway) = &config.walkway {
            builder.add_walkway(&walkway.a, &walkway.b, walkway.secs);
        }

        let graph = builder.build();
        info!(
            platforms = graph.node_count(),
            edges = graph.edge_count(),
            stations = graph.stations.len(),
            trips = by_trip.len(),
            rejected_hops,
            "built rail graph"
        );
        graph
    }

    pub fn node_count(&self) -> usize {
        self.platforms.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a platform by stop id.
    pub fn node(&self, stop_id: &str) -> Option<NodeId> {
        self.by_stop_id.get(stop_id).copied()
    }

    pub fn platform(&self, node: NodeId) -> &Platform {
        &self.platforms[node]
    }

    /// Arcs leaving `node`.
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.edges[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Weight of the arc `from → to`, if present.
    pub fn edge_secs(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.neighbors(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.secs)
    }

    /// Platforms sharing `code`, ordered by stop id.
    pub fn platforms_at(&self, code: &StationCode) -> &[NodeId] {
        self.stations.get(code).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Incremental builder; arcs are deduplicated by minimum weight.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    platforms: Vec<Platform>,
    by_stop_id: HashMap<String, NodeId>,
    arcs: HashMap<(NodeId, NodeId), u32>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a platform, returning its node. Re-adding a stop id is a no-op.
    pub fn add_platform(&mut self, platform: Platform) -> NodeId {
        if let Some(&id) = self.by_stop_id.get(&platform.stop_id) {
            return id;
        }
        let id = self.platforms.len();
        self.by_stop_id.insert(platform.stop_id.clone(), id);
        self.platforms.push(platform);
        id
    }

    pub fn node(&self, stop_id: &str) -> Option<NodeId> {
        self.by_stop_id.get(stop_id).copied()
    }

    /// Propose a weight for `from → to`; the smallest proposal wins.
    /// Self-loops are ignored.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, secs: u32) {
        if from == to {
            return;
        }
        self.arcs
            .entry((from, to))
            .and_modify(|w| *w = (*w).min(secs))
            .or_insert(secs);
    }

    fn station_index(&self) -> HashMap<StationCode, Vec<NodeId>> {
        let mut stations: HashMap<StationCode, Vec<NodeId>> = HashMap::new();
        for (id, p) in self.platforms.iter().enumerate() {
            if let Some(code) = &p.station {
                stations.entry(code.clone()).or_default().push(id);
            }
        }
        for nodes in stations.values_mut() {
            nodes.sort_by(|a, b| self.platforms[*a].stop_id.cmp(&self.platforms[*b].stop_id));
        }
        stations
    }

    /// Connect every pair of platforms sharing a station code.
    pub fn add_station_transfers(&mut self, secs: u32) {
        for nodes in self.station_index().into_values() {
            for (i, &a) in nodes.iter().enumerate() {
                for &b in &nodes[i + 1..] {
                    self.add_edge(a, b, secs);
                    self.add_edge(b, a, secs);
                }
            }
        }
    }

    /// Connect every platform of station `a` to every platform of `b`.
    pub fn add_walkway(&mut self, a: &StationCode, b: &StationCode, secs: u32) {
        let stations = self.station_index();
        let (Some(from), Some(to)) = (stations.get(a), stations.get(b)) else {
            return;
        };
        for &p in from {
            for &q in to {
                self.add_edge(p, q, secs);
                self.add_edge(q, p, secs);
            }
        }
    }

    /// Freeze into an immutable graph.
    pub fn build(self) -> RailGraph {
        let stations = self.station_index();
        let n = self.platforms.len();

        let mut arcs: Vec<((NodeId, NodeId), u32)> = self.arcs.into_iter().collect();
        arcs.sort_unstable();

        let mut offsets = vec![0; n + 1];
        for ((from, _), _) in &arcs {
            offsets[from + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let edges = arcs
            .into_iter()
            .map(|((_, to), secs)| Edge { to, secs })
            .collect();

        RailGraph {
            platforms: self.platforms,
            by_stop_id: self.by_stop_id,
            offsets,
            edges,
            stations,
        }
    }
}
