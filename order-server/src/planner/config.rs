//! Tunable policy for the optimizer.

use std::time::Duration;

use crate::domain::StationCode;

/// Extra seconds charged to rail plans between two particular stations.
///
/// The pair is unordered: it applies in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPenalty {
    pub a: StationCode,
    pub b: StationCode,
    pub secs: u32,
}

impl PairPenalty {
    pub fn new(a: StationCode, b: StationCode, secs: u32) -> Self {
        Self { a, b, secs }
    }

    /// Whether this penalty covers the journey between `x` and `y`.
    pub fn applies(&self, x: &StationCode, y: &StationCode) -> bool {
        (self.a == *x && self.b == *y) || (self.a == *y && self.b == *x)
    }
}

/// Configuration for choosing between walk, transit and rail for one pair.
#[derive(Debug, Clone)]
pub struct HybridConfig {
    /// Walking speed (metres per second).
    pub walk_speed_mps: f64,

    /// Walks shorter than this (metres) start out as the best plan.
    /// Longer walks are only used when nothing else is available.
    pub short_walk_m: f64,

    /// Fixed platform wait added to every rail plan (seconds).
    pub rail_wait_secs: u32,

    /// Flat penalty added to every rail plan (seconds).
    pub rail_penalty_secs: u32,

    /// Station pairs whose rail cost is known to be too optimistic.
    pub pair_penalties: Vec<PairPenalty>,
}

impl HybridConfig {
    /// Set the flat rail penalty.
    pub fn with_rail_penalty(mut self, secs: u32) -> Self {
        self.rail_penalty_secs = secs;
        self
    }

    /// Set the short walk threshold.
    pub fn with_short_walk(mut self, metres: f64) -> Self {
        self.short_walk_m = metres;
        self
    }

    /// Replace the pair penalties.
    pub fn with_pair_penalties(mut self, penalties: Vec<PairPenalty>) -> Self {
        self.pair_penalties = penalties;
        self
    }

    /// Total penalty for a rail plan between two stations.
    pub fn rail_penalty(&self, from: &StationCode, to: &StationCode) -> u32 {
        self.pair_penalties
            .iter()
            .filter(|p| p.applies(from, to))
            .fold(self.rail_penalty_secs, |acc, p| acc.saturating_add(p.secs))
    }
}

impl Default for HybridConfig {
    fn default() -> Self {
        // The TST/ETS walkway makes this hop look cheaper than it is.
        let pair_penalties = match (StationCode::parse("TST"), StationCode::parse("ETS")) {
            (Ok(a), Ok(b)) => vec![PairPenalty::new(a, b, 300)],
            _ => Vec::new(),
        };

        Self {
            walk_speed_mps: 1.2,
            short_walk_m: 1200.0,
            rail_wait_secs: 180,
            rail_penalty_secs: 120,
            pair_penalties,
        }
    }
}

/// Configuration for a whole optimize request.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Number of destinations a request must name.
    pub destination_count: usize,

    /// Pause after each geocoder call.
    pub geocode_pause: Duration,

    /// Pause after each pair is priced.
    pub planner_pause: Duration,

    pub hybrid: HybridConfig,
}

impl OptimizerConfig {
    /// Set both pauses. Tests use zero.
    pub fn with_pauses(mut self, geocode: Duration, planner: Duration) -> Self {
        self.geocode_pause = geocode;
        self.planner_pause = planner;
        self
    }

    pub fn with_hybrid(mut self, hybrid: HybridConfig) -> Self {
        self.hybrid = hybrid;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            destination_count: 5,
            geocode_pause: Duration::from_millis(350),
            planner_pause: Duration::from_millis(120),
            hybrid: HybridConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn default_config() {
        let config = OptimizerConfig::default();

        assert_eq!(config.destination_count, 5);
        assert_eq!(config.geocode_pause, Duration::from_millis(350));
        assert_eq!(config.planner_pause, Duration::from_millis(120));
        assert_eq!(config.hybrid.walk_speed_mps, 1.2);
        assert_eq!(config.hybrid.short_walk_m, 1200.0);
        assert_eq!(config.hybrid.rail_wait_secs, 180);
        assert_eq!(config.hybrid.rail_penalty_secs, 120);
        assert_eq!(config.hybrid.pair_penalties.len(), 1);
    }

    #[test]
    fn pair_penalty_is_unordered() {
        let config = HybridConfig::default();

        assert_eq!(config.rail_penalty(&code("TST"), &code("ETS")), 420);
        assert_eq!(config.rail_penalty(&code("ETS"), &code("TST")), 420);
        assert_eq!(config.rail_penalty(&code("TST"), &code("WTS")), 120);
    }

    #[test]
    fn builder_methods() {
        let config = OptimizerConfig::default()
            .with_pauses(Duration::ZERO, Duration::ZERO)
            .with_hybrid(
                HybridConfig::default()
                    .with_rail_penalty(0)
                    .with_short_walk(800.0)
                    .with_pair_penalties(Vec::new()),
            );

        assert_eq!(config.geocode_pause, Duration::ZERO);
        assert_eq!(config.planner_pause, Duration::ZERO);
        assert_eq!(config.hybrid.short_walk_m, 800.0);
        assert_eq!(config.hybrid.rail_penalty(&code("TST"), &code("ETS")), 0);
    }
}
