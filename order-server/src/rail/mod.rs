//! Rail routing over a graph derived from the static GTFS feed.
//!
//! The graph is built once from scheduled stop times, platform transfers
//! and a walkway correction, then answers shortest-time queries between
//! platforms and between stations.

mod config;
mod graph;
mod path;
mod router;

pub use config::{RailConfig, Walkway};
pub use graph::{Edge, GraphBuilder, NodeId, Platform, RailGraph};
pub use path::{StationRoute, best_station_route, shortest_between, shortest_seconds};
pub use router::RailRouter;

#[cfg(test)]
pub(crate) use graph::fixtures;
