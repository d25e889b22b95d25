//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CandidateKind, Leg, Point};
use crate::planner::{OptimizeRequest, Optimized, Segment};

/// Request body for `POST /api/optimize`.
///
/// Missing fields deserialize as empty so validation can report them.
#[derive(Debug, Deserialize)]
pub struct OptimizeBody {
    /// Starting place label
    #[serde(default)]
    pub origin: String,

    /// Places to visit
    #[serde(default)]
    pub destinations: Vec<String>,
}

impl From<OptimizeBody> for OptimizeRequest {
    fn from(body: OptimizeBody) -> Self {
        OptimizeRequest::new(body.origin, body.destinations)
    }
}

/// A geocoded point.
#[derive(Debug, Serialize)]
pub struct PointResult {
    pub label: String,
    pub query: String,
    pub display: String,
    pub lat: f64,
    pub lon: f64,

    /// Rail station code, for known labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

impl PointResult {
    pub fn from_point(point: &Point) -> Self {
        Self {
            label: point.label.clone(),
            query: point.query.clone(),
            display: point.display.clone(),
            lat: point.coord.lat,
            lon: point.coord.lon,
            station: point.station.as_ref().map(|s| s.to_string()),
        }
    }
}

/// One leg of a segment.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub mode: String,
    pub route: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub duration_secs: u32,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode.to_string(),
            route: leg.route.clone(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            duration_secs: leg.duration_secs,
        }
    }
}

/// Travel between two consecutive points of the order.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub from: String,
    pub to: String,
    pub duration_min: u64,

    /// Which candidate won: `walk`, `transit` or `rail`
    pub mode: CandidateKind,

    pub legs: Vec<LegResult>,
}

impl SegmentResult {
    pub fn from_segment(segment: &Segment, points: &[Point]) -> Self {
        Self {
            from: points[segment.from].label.clone(),
            to: points[segment.to].label.clone(),
            duration_min: round_minutes(u64::from(segment.plan.duration_secs)),
            mode: segment.plan.kind,
            legs: segment.plan.legs.iter().map(LegResult::from_leg).collect(),
        }
    }
}

/// Response for `POST /api/optimize`.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub origin: PointResult,
    pub destinations: Vec<PointResult>,

    /// Labels in visiting order, origin first
    pub order: Vec<String>,

    /// Total travel time in minutes
    pub total_min: u64,

    pub segments: Vec<SegmentResult>,
    pub notes: Vec<String>,
}

impl OptimizeResponse {
    /// `None` if the result has no origin point.
    pub fn from_optimized(result: &Optimized) -> Option<Self> {
        let (origin, destinations) = result.points.split_first()?;

        Some(Self {
            origin: PointResult::from_point(origin),
            destinations: destinations.iter().map(PointResult::from_point).collect(),
            order: result
                .ordered_labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_min: round_minutes(result.order.total_secs),
            segments: result
                .segments
                .iter()
                .map(|s| SegmentResult::from_segment(s, &result.points))
                .collect(),
            notes: result.notes.clone(),
        })
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Seconds to whole minutes, rounding halves up.
fn round_minutes(secs: u64) -> u64 {
    (secs + 30) / 60
}
