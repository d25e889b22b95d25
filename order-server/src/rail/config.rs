//! Rail graph configuration.

use crate::domain::StationCode;
use crate::feed::FeedSource;

/// Default namespace prefix of rail platform stop ids.
const DEFAULT_STOP_PREFIX: &str = "MTR-";

/// GTFS `route_type` for subway / metro service.
const DEFAULT_ROUTE_TYPE: &str = "1";

/// A pedestrian link between two stations that the feed codes separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkway {
    pub a: StationCode,
    pub b: StationCode,
    pub secs: u32,
}

/// Parameters for building and loading the rail graph.
#[derive(Debug, Clone)]
pub struct RailConfig {
    /// Where to fetch the GTFS archive. `None` disables rail routing.
    pub feed: Option<FeedSource>,

    /// Stops whose id starts with this prefix are rail platforms.
    pub stop_prefix: String,

    /// Routes with this `route_type` are rail routes.
    pub route_type: String,

    /// Scheduled hops must be shorter than this (seconds).
    /// Longer gaps are treated as feed errors or midnight rollover.
    pub max_hop_secs: u32,

    /// Cost of changing between platforms of one station (seconds).
    pub transfer_secs: u32,

    /// Extra pedestrian link between two separately coded stations.
    pub walkway: Option<Walkway>,

    /// Download timeout for the feed archive (seconds).
    pub fetch_timeout_secs: u64,

    /// Load the graph at startup rather than on first use.
    pub preload: bool,
}

impl RailConfig {
    /// Create a configuration reading the feed from `source`.
    pub fn new(source: FeedSource) -> Self {
        Self {
            feed: Some(source),
            ..Self::default()
        }
    }

    /// Set the platform transfer cost.
    pub fn with_transfer_secs(mut self, secs: u32) -> Self {
        self.transfer_secs = secs;
        self
    }

    /// Set or clear the walkway link.
    pub fn with_walkway(mut self, walkway: Option<Walkway>) -> Self {
        self.walkway = walkway;
        self
    }

    /// Load eagerly at startup.
    pub fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }
}

impl Default for RailConfig {
    fn default() -> Self {
        // Tsim Sha Tsui and East Tsim Sha Tsui are joined by a subway
        // but carry separate codes in the feed.
        let walkway = match (StationCode::parse("TST"), StationCode::parse("ETS")) {
            (Ok(a), Ok(b)) => Some(Walkway { a, b, secs: 300 }),
            _ => None,
        };

        Self {
            feed: None,
            stop_prefix: DEFAULT_STOP_PREFIX.to_string(),
            route_type: DEFAULT_ROUTE_TYPE.to_string(),
            max_hop_secs: 3600,
            transfer_secs: 120,
            walkway,
            fetch_timeout_secs: 120,
            preload: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RailConfig::default();
        assert!(config.feed.is_none());
        assert_eq!(config.stop_prefix, "MTR-");
        assert_eq!(config.route_type, "1");
        assert_eq!(config.max_hop_secs, 3600);
        assert_eq!(config.transfer_secs, 120);
        assert!(!config.preload);

        let walkway = config.walkway.unwrap();
        assert_eq!(walkway.a.as_str(), "TST");
        assert_eq!(walkway.b.as_str(), "ETS");
        assert_eq!(walkway.secs, 300);
    }

    #[test]
    fn builder_methods() {
        let config = RailConfig::new(FeedSource::parse("gtfs.zip"))
            .with_transfer_secs(90)
            .with_walkway(None)
            .with_preload(true);

        assert!(config.feed.is_some());
        assert_eq!(config.transfer_secs, 90);
        assert!(config.walkway.is_none());
        assert!(config.preload);
    }
}
