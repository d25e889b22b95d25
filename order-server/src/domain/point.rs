//! Geographic points and walking estimates.

use serde::Serialize;

use super::StationCode;

/// Mean Earth radius used for great-circle distances (metres).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_m(&self, other: &Coord) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let s = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * s.sqrt().min(1.0).asin()
    }

    /// `lat,lon` as expected by trip planners.
    pub fn to_place_param(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Walking time in whole seconds between two coordinates.
pub fn walk_seconds(from: &Coord, to: &Coord, speed_mps: f64) -> u32 {
    (from.distance_m(to) / speed_mps).round() as u32
}

/// A location the user asked to visit, after geocoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// The text the user typed.
    pub label: String,

    /// The text sent to the geocoder (alias expansion applied).
    pub query: String,

    /// Geocoder's display name for the match.
    pub display: String,

    #[serde(flatten)]
    pub coord: Coord,

    /// Rail station code, when the label is a known alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<StationCode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = Coord::new(22.3417, 114.1939);
        assert_eq!(p.distance_m(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coord::new(22.0, 114.0);
        let b = Coord::new(23.0, 114.0);
        let expected = EARTH_RADIUS_M * 1f64.to_radians();
        assert!((a.distance_m(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let wts = Coord::new(22.3417, 114.1939);
        let tst = Coord::new(22.2934, 114.1687);
        assert!((wts.distance_m(&tst) - tst.distance_m(&wts)).abs() < 1e-9);
        // Roughly 6 km apart
        let d = wts.distance_m(&tst);
        assert!(d > 5_000.0 && d < 7_000.0, "got {d}");
    }

    #[test]
    fn walk_seconds_rounds() {
        let a = Coord::new(22.0, 114.0);
        let b = Coord::new(22.0 + (120.0 / EARTH_RADIUS_M).to_degrees(), 114.0);
        // 120 m at 1.2 m/s
        assert_eq!(walk_seconds(&a, &b, 1.2), 100);
    }

    #[test]
    fn place_param_format() {
        assert_eq!(Coord::new(22.5, 114.25).to_place_param(), "22.5,114.25");
    }
}
