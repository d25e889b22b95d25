//! Typed GTFS records.
//!
//! Each record is built from a [`Row`]; rows missing required fields or
//! carrying malformed values yield `None` and are skipped by the loader.

use crate::domain::{Coord, ScheduleTime};

use super::table::Row;

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub stop_id: String,
    pub name: String,
    pub coord: Coord,
}

impl StopRecord {
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        let stop_id = row.non_empty("stop_id")?;
        let lat = row.get("stop_lat").trim().parse::<f64>().ok()?;
        let lon = row.get("stop_lon").trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        Some(Self {
            stop_id: stop_id.to_string(),
            name: row.get("stop_name").to_string(),
            coord: Coord::new(lat, lon),
        })
    }
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub route_id: String,
    pub route_type: String,
}

impl RouteRecord {
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        Some(Self {
            route_id: row.non_empty("route_id")?.to_string(),
            route_type: row.get("route_type").trim().to_string(),
        })
    }
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub trip_id: String,
    pub route_id: String,
}

impl TripRecord {
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        Some(Self {
            trip_id: row.non_empty("trip_id")?.to_string(),
            route_id: row.non_empty("route_id")?.to_string(),
        })
    }
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    /// Missing sequence numbers sort first, as 0.
    pub sequence: u32,
    pub arrival: ScheduleTime,
    pub departure: ScheduleTime,
}

impl StopTimeRecord {
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        let sequence = match row.non_empty("stop_sequence") {
            Some(s) => s.trim().parse().ok()?,
            None => 0,
        };

        Some(Self {
            trip_id: row.non_empty("trip_id")?.to_string(),
            stop_id: row.non_empty("stop_id")?.to_string(),
            sequence,
            arrival: ScheduleTime::parse(row.get("arrival_time")).ok()?,
            departure: ScheduleTime::parse(row.get("departure_time")).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_table;

    #[test]
    fn stop_record_parses() {
        let table = parse_table(
            "stop_id,stop_name,stop_lat,stop_lon\nMTR-WTS-1,\"Wong Tai Sin\",22.3417,114.1939\n",
        );
        let stop = StopRecord::from_row(&table.rows().next().unwrap()).unwrap();
        assert_eq!(stop.stop_id, "MTR-WTS-1");
        assert_eq!(stop.name, "Wong Tai Sin");
        assert_eq!(stop.coord, Coord::new(22.3417, 114.1939));
    }

    #[test]
    fn stop_record_rejects_bad_coordinates() {
        let table = parse_table("stop_id,stop_lat,stop_lon\nA,north,114\nB,22.3,\nC,NaN,1\n");
        assert!(table.rows().all(|r| StopRecord::from_row(&r).is_none()));
    }

    #[test]
    fn route_and_trip_records() {
        let routes = parse_table("route_id,route_type\nKTL, 1\n,1\n");
        let parsed: Vec<_> = routes.rows().filter_map(|r| RouteRecord::from_row(&r)).collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].route_type, "1");

        let trips = parse_table("route_id,trip_id\nKTL,T1\nKTL,\n");
        let parsed: Vec<_> = trips.rows().filter_map(|r| TripRecord::from_row(&r)).collect();
        assert_eq!(parsed, [TripRecord {
            trip_id: "T1".into(),
            route_id: "KTL".into()
        }]);
    }

    #[test]
    fn stop_time_record_parses_times() {
        let table = parse_table(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,24:01:00,24:01:30,MTR-WTS-1,3\n\
             T1,08:00:00,08:00:30,MTR-WTS-1,\n\
             T1,8am,08:00:30,MTR-WTS-1,4\n\
             T1,08:00:00,08:00:30,MTR-WTS-1,x\n",
        );
        let parsed: Vec<_> = table
            .rows()
            .filter_map(|r| StopTimeRecord::from_row(&r))
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].sequence, 3);
        assert_eq!(parsed[0].arrival.seconds(), 86_460);
        assert_eq!(parsed[0].departure.seconds(), 86_490);
        assert_eq!(parsed[1].sequence, 0);
    }
}
