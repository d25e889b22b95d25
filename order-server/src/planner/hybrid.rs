//! Choosing how to travel between two points.
//!
//! Up to three candidates are priced for each ordered pair:
//!
//! - **walk**: great-circle distance at walking speed
//! - **transit**: the external trip planner's first itinerary
//! - **rail**: walk to a platform, wait, ride the rail graph, walk on
//!
//! A short walk starts out as the best plan. Each other candidate replaces
//! the current best only when strictly shorter. A long walk is used only
//! when neither transit nor rail produced anything.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::domain::{CandidateKind, Coord, Leg, LegMode, Plan, Point, walk_seconds};
use crate::otp::TransitError;
use crate::rail::{RailGraph, RailRouter, best_station_route};

use super::config::HybridConfig;

/// Trait for the external walk + transit trip planner.
///
/// This abstraction allows the optimizer to be tested with mock data.
pub trait TransitPlanner {
    /// Fastest itinerary from `from` to `to` departing at `at`.
    async fn plan(&self, from: &Coord, to: &Coord, at: NaiveDateTime) -> Result<Plan, TransitError>;
}

/// Why a candidate could not be priced.
#[derive(Debug)]
pub enum Absence {
    /// One of the points has no rail station.
    NoStation,
    /// Both points are served by the same station.
    SameStation,
    /// The rail graph could not be loaded.
    GraphUnavailable,
    /// The graph has no route between the stations.
    NoRoute,
    /// The trip planner failed.
    Transit(TransitError),
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::NoStation => write!(f, "no station code"),
            Absence::SameStation => write!(f, "same station"),
            Absence::GraphUnavailable => write!(f, "rail graph unavailable"),
            Absence::NoRoute => write!(f, "no rail route"),
            Absence::Transit(e) => write!(f, "{e}"),
        }
    }
}

/// Outcome of pricing one candidate.
#[derive(Debug)]
pub enum Candidate {
    Found(Plan),
    Absent(Absence),
}

impl Candidate {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Candidate::Found(plan) => Some(plan),
            Candidate::Absent(_) => None,
        }
    }
}

#[derive(Debug)]
enum GraphState {
    Untried,
    Ready(Arc<RailGraph>),
    Unavailable,
}

/// One request's view of the shared rail graph.
///
/// The graph is asked for at most once: after a failure the rest of the
/// request goes without rail instead of retrying the download per pair.
pub struct RailAccess<'a> {
    router: &'a RailRouter,
    state: GraphState,
}

impl<'a> RailAccess<'a> {
    pub fn new(router: &'a RailRouter) -> Self {
        Self {
            router,
            state: GraphState::Untried,
        }
    }

    /// The graph, loading it on first use.
    pub async fn graph(&mut self) -> Option<Arc<RailGraph>> {
        if let GraphState::Untried = self.state {
            self.state = match self.router.graph().await {
                Ok(graph) => GraphState::Ready(graph),
                Err(e) => {
                    warn!(error = %e, "rail graph unavailable, continuing without rail");
                    GraphState::Unavailable
                }
            };
        }

        match &self.state {
            GraphState::Ready(graph) => Some(Arc::clone(graph)),
            _ => None,
        }
    }

    /// Whether a load was attempted and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state, GraphState::Unavailable)
    }
}

/// The walking plan and its distance in metres.
pub fn walk_plan(from: &Point, to: &Point, config: &HybridConfig) -> (Plan, f64) {
    let distance = from.coord.distance_m(&to.coord);
    let secs = walk_seconds(&from.coord, &to.coord, config.walk_speed_mps);
    let leg = Leg::walk(from.label.clone(), to.label.clone(), secs);
    (Plan::new(CandidateKind::Walk, secs, vec![leg]), distance)
}

/// Price the rail candidate on an already loaded graph.
pub fn rail_plan(graph: &RailGraph, from: &Point, to: &Point, config: &HybridConfig) -> Candidate {
    let (Some(from_code), Some(to_code)) = (&from.station, &to.station) else {
        return Candidate::Absent(Absence::NoStation);
    };
    if from_code == to_code {
        return Candidate::Absent(Absence::SameStation);
    }

    let Some(route) = best_station_route(
        graph,
        &from.coord,
        from_code,
        &to.coord,
        to_code,
        config.walk_speed_mps,
        config.rail_wait_secs,
    ) else {
        return Candidate::Absent(Absence::NoRoute);
    };

    let board = graph.platform(route.board);
    let alight = graph.platform(route.alight);
    let legs = vec![
        Leg::walk(from.label.clone(), board.name.clone(), route.walk_in_secs),
        Leg {
            mode: LegMode::Rail,
            route: Some("MTR".to_string()),
            from: Some(board.name.clone()),
            to: Some(alight.name.clone()),
            duration_secs: config.rail_wait_secs.saturating_add(route.ride_secs),
        },
        Leg::walk(alight.name.clone(), to.label.clone(), route.walk_out_secs),
    ];

    let secs = route
        .total_secs(config.rail_wait_secs)
        .saturating_add(config.rail_penalty(from_code, to_code));
    Candidate::Found(Plan::new(CandidateKind::Rail, secs, legs))
}

/// Pick the plan for a pair from its priced candidates.
///
/// `challengers` are considered in order; ties keep the earlier plan.
pub fn select(
    walk: Plan,
    walk_m: f64,
    challengers: impl IntoIterator<Item = Candidate>,
    config: &HybridConfig,
) -> Plan {
    let mut best = (walk_m < config.short_walk_m).then(|| walk.clone());

    for candidate in challengers {
        let Candidate::Found(plan) = candidate else {
            continue;
        };
        if best.as_ref().is_none_or(|b| plan.duration_secs < b.duration_secs) {
            best = Some(plan);
        }
    }

    best.unwrap_or(walk)
}

/// The plan chosen for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub plan: Plan,

    /// Whether the trip planner failed for this pair.
    pub transit_failed: bool,
}

/// Prices and chooses plans for point pairs.
pub struct HybridSelector<'a, T> {
    planner: &'a T,
    config: &'a HybridConfig,
}

impl<'a, T: TransitPlanner> HybridSelector<'a, T> {
    pub fn new(planner: &'a T, config: &'a HybridConfig) -> Self {
        Self { planner, config }
    }

    /// Ask the trip planner. Failures become an absent candidate.
    pub async fn transit(&self, from: &Point, to: &Point, at: NaiveDateTime) -> Candidate {
        match self.planner.plan(&from.coord, &to.coord, at).await {
            Ok(plan) => Candidate::Found(plan),
            Err(e) => {
                warn!(
                    from = %from.label,
                    to = %to.label,
                    timeout = e.is_timeout(),
                    error = %e,
                    "transit candidate unavailable"
                );
                Candidate::Absent(Absence::Transit(e))
            }
        }
    }

    /// Price the rail candidate, loading the graph only if both points
    /// have distinct stations.
    pub async fn rail(&self, access: &mut RailAccess<'_>, from: &Point, to: &Point) -> Candidate {
        match (&from.station, &to.station) {
            (Some(a), Some(b)) if a == b => return Candidate::Absent(Absence::SameStation),
            (Some(_), Some(_)) => {}
            _ => return Candidate::Absent(Absence::NoStation),
        }

        match access.graph().await {
            Some(graph) => rail_plan(&graph, from, to, self.config),
            None => Candidate::Absent(Absence::GraphUnavailable),
        }
    }

    /// The chosen plan from `from` to `to`.
    pub async fn choose(
        &self,
        access: &mut RailAccess<'_>,
        from: &Point,
        to: &Point,
        at: NaiveDateTime,
    ) -> Choice {
        let (walk, walk_m) = walk_plan(from, to, self.config);
        let transit = self.transit(from, to, at).await;
        let transit_failed = transit.plan().is_none();
        let rail = self.rail(access, from, to).await;

        if let Candidate::Absent(reason) = &rail {
            debug!(from = %from.label, to = %to.label, %reason, "no rail candidate");
        }

        let plan = select(walk, walk_m, [transit, rail], self.config);
        debug!(
            from = %from.label,
            to = %to.label,
            kind = %plan.kind,
            secs = plan.duration_secs,
            "pair priced"
        );
        Choice {
            plan,
            transit_failed,
        }
    }
}
