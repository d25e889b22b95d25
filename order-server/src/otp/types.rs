//! OpenTripPlanner `/plan` response types.
//!
//! Only the fields the optimizer reads are modelled; everything else in
//! the (large) response is ignored.

use serde::Deserialize;

use crate::domain::{CandidateKind, Leg, LegMode, Plan};

/// Top-level `/plan` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub plan: Option<TripPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripPlan {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Itinerary {
    /// Seconds.
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<OtpLeg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpLeg {
    pub mode: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub from: Option<OtpPlace>,
    pub to: Option<OtpPlace>,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpPlace {
    pub name: Option<String>,
}

impl PlanResponse {
    /// The first itinerary, if the planner found any.
    pub fn first_itinerary(self) -> Option<Itinerary> {
        self.plan?.itineraries.into_iter().next()
    }
}

impl Itinerary {
    /// Convert into a transit plan.
    pub fn into_plan(self) -> Plan {
        let legs = self.legs.into_iter().map(OtpLeg::into_leg).collect();
        Plan::new(CandidateKind::Transit, round_secs(self.duration), legs)
    }
}

impl OtpLeg {
    fn into_leg(self) -> Leg {
        let route = self
            .route_short_name
            .filter(|s| !s.is_empty())
            .or(self.route_long_name.filter(|s| !s.is_empty()));

        Leg {
            mode: LegMode::parse(&self.mode),
            route,
            from: self.from.and_then(|p| p.name),
            to: self.to.and_then(|p| p.name),
            duration_secs: round_secs(self.duration),
        }
    }
}

fn round_secs(secs: f64) -> u32 {
    if secs.is_finite() && secs > 0.0 {
        secs.round() as u32
    } else {
        0
    }
}
