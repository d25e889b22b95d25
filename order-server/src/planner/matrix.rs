//! Pairwise travel costs between the points of a request.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::info;

use crate::domain::{CandidateKind, Plan, Point};
use crate::rail::RailRouter;

use super::hybrid::{HybridSelector, RailAccess, TransitPlanner};

/// Square matrix of travel seconds plus the plan behind each entry.
///
/// The diagonal is zero and has no plan.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    secs: Vec<Vec<u32>>,
    plans: HashMap<(usize, usize), Plan>,
}

impl CostMatrix {
    /// An all-zero `n`×`n` matrix.
    pub fn new(n: usize) -> Self {
        Self {
            secs: vec![vec![0; n]; n],
            plans: HashMap::new(),
        }
    }

    /// A matrix of bare costs without plans.
    ///
    /// # Panics
    ///
    /// Panics if `secs` is not square.
    pub fn from_secs(secs: Vec<Vec<u32>>) -> Self {
        assert!(
            secs.iter().all(|row| row.len() == secs.len()),
            "cost matrix must be square"
        );
        Self {
            secs,
            plans: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.secs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secs.is_empty()
    }

    pub fn secs(&self, from: usize, to: usize) -> u32 {
        self.secs[from][to]
    }

    pub fn plan(&self, from: usize, to: usize) -> Option<&Plan> {
        self.plans.get(&(from, to))
    }

    /// Record the plan for an off-diagonal entry.
    pub fn insert(&mut self, from: usize, to: usize, plan: Plan) {
        self.secs[from][to] = plan.duration_secs;
        self.plans.insert((from, to), plan);
    }

    /// How many entries each candidate kind won.
    pub fn kind_counts(&self) -> HashMap<CandidateKind, usize> {
        let mut counts = HashMap::new();
        for plan in self.plans.values() {
            *counts.entry(plan.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// A matrix together with what went missing while building it.
#[derive(Debug, Clone)]
pub struct MatrixReport {
    pub matrix: CostMatrix,

    /// Pairs for which the trip planner gave nothing.
    pub transit_failures: usize,

    /// Whether rail was needed but the graph could not be loaded.
    pub rail_unavailable: bool,
}

impl MatrixReport {
    /// Number of off-diagonal pairs.
    pub fn pair_count(&self) -> usize {
        let n = self.matrix.len();
        n * n.saturating_sub(1)
    }
}

/// Builds a [`CostMatrix`] one pair at a time.
///
/// Pairs are priced strictly in sequence with a pause after each, to stay
/// within the external planners' rate limits.
pub struct MatrixBuilder<'a, T> {
    selector: HybridSelector<'a, T>,
    rail: &'a RailRouter,
    pause: Duration,
}

impl<'a, T: TransitPlanner> MatrixBuilder<'a, T> {
    pub fn new(selector: HybridSelector<'a, T>, rail: &'a RailRouter, pause: Duration) -> Self {
        Self {
            selector,
            rail,
            pause,
        }
    }

    /// Price every ordered pair of `points`, departing at `at`.
    pub async fn build(&self, points: &[Point], at: NaiveDateTime) -> MatrixReport {
        let n = points.len();
        let mut matrix = CostMatrix::new(n);
        let mut access = RailAccess::new(self.rail);
        let mut transit_failures = 0;

        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                let choice = self.selector.choose(&mut access, from, to, at).await;
                if choice.transit_failed {
                    transit_failures += 1;
                }
                matrix.insert(i, j, choice.plan);

                if !self.pause.is_zero() {
                    tokio::time::sleep(self.pause).await;
                }
            }
        }

        let counts = matrix.kind_counts();
        info!(
            points = n,
            walk = counts.get(&CandidateKind::Walk).copied().unwrap_or(0),
            transit = counts.get(&CandidateKind::Transit).copied().unwrap_or(0),
            rail = counts.get(&CandidateKind::Rail).copied().unwrap_or(0),
            transit_failures,
            "cost matrix built"
        );

        MatrixReport {
            matrix,
            transit_failures,
            rail_unavailable: access.is_unavailable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::HybridConfig;
    use crate::planner::mock::{FixedPlanner, departure, point};
    use crate::rail::{RailConfig, fixtures::sample_graph};

    fn points() -> Vec<Point> {
        vec![
            point("Wong Tai Sin", 22.3417, 114.1939, Some("WTS")),
            point("Sha Tin", 22.3822, 114.1873, Some("SHT")),
            point("Harbour", 22.2900, 114.1600, None),
        ]
    }

    #[test]
    fn insert_sets_cost() {
        let mut matrix = CostMatrix::new(2);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.secs(0, 1), 0);

        matrix.insert(0, 1, Plan::new(CandidateKind::Transit, 640, Vec::new()));
        assert_eq!(matrix.secs(0, 1), 640);
        assert_eq!(matrix.plan(0, 1).unwrap().kind, CandidateKind::Transit);
        assert!(matrix.plan(1, 0).is_none());
        assert!(matrix.plan(0, 0).is_none());
    }

    #[test]
    #[should_panic(expected = "square")]
    fn from_secs_rejects_ragged() {
        CostMatrix::from_secs(vec![vec![0, 1], vec![0]]);
    }

    #[tokio::test]
    async fn prices_every_ordered_pair() {
        let config = HybridConfig::default();
        let planner = FixedPlanner::answering(2000);
        let router = RailRouter::with_graph(RailConfig::default(), sample_graph());
        let builder = MatrixBuilder::new(
            HybridSelector::new(&planner, &config),
            &router,
            Duration::ZERO,
        );

        let report = builder.build(&points(), departure()).await;

        assert_eq!(report.pair_count(), 6);
        assert_eq!(planner.calls(), 6);
        assert_eq!(report.transit_failures, 0);
        assert!(!report.rail_unavailable);

        let m = &report.matrix;
        for i in 0..3 {
            assert_eq!(m.secs(i, i), 0);
            for j in (0..3).filter(|&j| j != i) {
                assert_eq!(m.secs(i, j), m.plan(i, j).unwrap().duration_secs);
            }
        }
        // wait 180 + ride 780 + flat penalty 120
        assert_eq!(m.plan(0, 1).unwrap().kind, CandidateKind::Rail);
        assert_eq!(m.secs(0, 1), 1080);
        assert_eq!(m.plan(0, 2).unwrap().kind, CandidateKind::Transit);
    }

    #[tokio::test]
    async fn reports_degraded_modes() {
        let config = HybridConfig::default();
        let planner = FixedPlanner::failing();
        let router = RailRouter::new(RailConfig::default());
        let builder = MatrixBuilder::new(
            HybridSelector::new(&planner, &config),
            &router,
            Duration::ZERO,
        );

        let report = builder.build(&points(), departure()).await;

        assert_eq!(report.transit_failures, 6);
        assert!(report.rail_unavailable);
        assert!(
            report
                .matrix
                .kind_counts()
                .keys()
                .all(|k| *k == CandidateKind::Walk)
        );
    }
}
