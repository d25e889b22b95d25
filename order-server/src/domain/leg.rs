//! Journey legs and per-pair travel plans.

use std::fmt;

use serde::{Serialize, Serializer};

/// Transport mode of a single leg.
///
/// Trip planners report modes as uppercase strings; anything not listed
/// here is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LegMode {
    Walk,
    Bus,
    Subway,
    Rail,
    Tram,
    Ferry,
    Other(String),
}

impl LegMode {
    /// Parse a planner mode string (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "WALK" => LegMode::Walk,
            "BUS" => LegMode::Bus,
            "SUBWAY" => LegMode::Subway,
            "RAIL" => LegMode::Rail,
            "TRAM" => LegMode::Tram,
            "FERRY" => LegMode::Ferry,
            other => LegMode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LegMode::Walk => "WALK",
            LegMode::Bus => "BUS",
            LegMode::Subway => "SUBWAY",
            LegMode::Rail => "RAIL",
            LegMode::Tram => "TRAM",
            LegMode::Ferry => "FERRY",
            LegMode::Other(s) => s,
        }
    }
}

impl fmt::Display for LegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LegMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One mode-homogeneous piece of a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub mode: LegMode,

    /// Route or line label, if the mode has one.
    pub route: Option<String>,

    pub from: Option<String>,
    pub to: Option<String>,

    pub duration_secs: u32,
}

impl Leg {
    /// A walking leg between two named places.
    pub fn walk(from: impl Into<String>, to: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            mode: LegMode::Walk,
            route: None,
            from: Some(from.into()),
            to: Some(to.into()),
            duration_secs,
        }
    }
}

/// Which candidate produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Walk,
    Transit,
    Rail,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CandidateKind::Walk => "walk",
            CandidateKind::Transit => "transit",
            CandidateKind::Rail => "rail",
        };
        f.write_str(s)
    }
}

/// A travel plan between two points: total duration plus its legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub kind: CandidateKind,
    pub duration_secs: u32,
    pub legs: Vec<Leg>,
}

impl Plan {
    pub fn new(kind: CandidateKind, duration_secs: u32, legs: Vec<Leg>) -> Self {
        Self {
            kind,
            duration_secs,
            legs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_known() {
        assert_eq!(LegMode::parse("WALK"), LegMode::Walk);
        assert_eq!(LegMode::parse("bus"), LegMode::Bus);
        assert_eq!(LegMode::parse(" Subway "), LegMode::Subway);
        assert_eq!(LegMode::parse("FERRY"), LegMode::Ferry);
    }

    #[test]
    fn mode_parse_other_preserved() {
        let mode = LegMode::parse("cable_car");
        assert_eq!(mode, LegMode::Other("CABLE_CAR".to_string()));
        assert_eq!(mode.as_str(), "CABLE_CAR");
    }

    #[test]
    fn leg_serializes_mode_as_string() {
        let leg = Leg::walk("Origin", "Tai Po Centre", 300);
        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["mode"], "WALK");
        assert_eq!(json["from"], "Origin");
        assert_eq!(json["duration_secs"], 300);
        assert!(json["route"].is_null());
    }

    #[test]
    fn candidate_kind_serializes_lowercase() {
        let plan = Plan::new(CandidateKind::Rail, 10, Vec::new());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["kind"], "rail");
        assert_eq!(CandidateKind::Transit.to_string(), "transit");
    }
}
