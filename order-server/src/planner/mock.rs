//! In-memory collaborators for planner tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{CandidateKind, Coord, Leg, LegMode, Plan, Point, StationCode};
use crate::geocode::{GeocodeError, Geocoder, Place};
use crate::otp::TransitError;

use super::hybrid::TransitPlanner;

/// A fixed departure time.
pub fn departure() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap()
}

pub fn point(label: &str, lat: f64, lon: f64, station: Option<&str>) -> Point {
    Point {
        label: label.to_string(),
        query: label.to_string(),
        display: label.to_string(),
        coord: Coord::new(lat, lon),
        station: station.map(|s| StationCode::parse(s).unwrap()),
    }
}

/// A transit planner answering every query with the same duration, or
/// failing when `secs` is `None`.
pub struct FixedPlanner {
    pub secs: Option<u32>,
    pub calls: AtomicUsize,
}

impl FixedPlanner {
    pub fn answering(secs: u32) -> Self {
        Self {
            secs: Some(secs),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            secs: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransitPlanner for FixedPlanner {
    async fn plan(&self, _from: &Coord, _to: &Coord, _at: NaiveDateTime) -> Result<Plan, TransitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let secs = self.secs.ok_or(TransitError::NoItinerary)?;
        let leg = Leg {
            mode: LegMode::Bus,
            route: Some("1A".to_string()),
            from: None,
            to: None,
            duration_secs: secs,
        };
        Ok(Plan::new(CandidateKind::Transit, secs, vec![leg]))
    }
}

/// A transit planner with a duration per destination latitude.
///
/// Lets tests shape a cost matrix through the real pipeline.
pub struct TablePlanner {
    pub secs: HashMap<(u64, u64), u32>,
}

impl TablePlanner {
    pub fn key(from: &Coord, to: &Coord) -> (u64, u64) {
        (from.lat.to_bits(), to.lat.to_bits())
    }
}

impl TransitPlanner for TablePlanner {
    async fn plan(&self, from: &Coord, to: &Coord, _at: NaiveDateTime) -> Result<Plan, TransitError> {
        let secs = *self
            .secs
            .get(&Self::key(from, to))
            .ok_or(TransitError::NoItinerary)?;
        Ok(Plan::new(CandidateKind::Transit, secs, Vec::new()))
    }
}

/// A geocoder over a fixed table that records every query.
pub struct StubGeocoder {
    pub places: HashMap<String, Coord>,
    pub queries: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn new(places: &[(&str, f64, f64)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(q, lat, lon)| (q.to_string(), Coord::new(*lat, *lon)))
                .collect(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Geocoder for StubGeocoder {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        self.queries.lock().unwrap().push(query.to_string());
        let coord = self
            .places
            .get(query)
            .copied()
            .ok_or_else(|| GeocodeError::NoResults(query.to_string()))?;
        Ok(Place {
            coord,
            display: format!("{query}, Hong Kong"),
        })
    }
}
