//! The optimize request pipeline: validate, geocode, price, order.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::domain::{Plan, Point};
use crate::geocode::{AliasTable, GeocodeError, Geocoder};
use crate::rail::RailRouter;

use super::config::OptimizerConfig;
use super::hybrid::{HybridSelector, TransitPlanner};
use super::matrix::{MatrixBuilder, MatrixReport};
use super::order::{VisitOrder, best_order};

/// Error from validating an optimize request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Need origin + exactly {expected} destinations (got {got})")]
    WrongCount { expected: usize, got: usize },

    #[error("origin must not be empty")]
    EmptyOrigin,

    #[error("destination {index} must not be empty")]
    EmptyDestination { index: usize },

    #[error("duplicate destination: {0}")]
    DuplicateDestination(String),
}

/// Error from running the optimizer.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("failed to geocode {label}: {source}")]
    Geocode {
        label: String,
        #[source]
        source: GeocodeError,
    },

    #[error("no visiting order found")]
    NoOrder,
}

/// What the user asked for: a start and the places to visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub origin: String,
    pub destinations: Vec<String>,
}

impl OptimizeRequest {
    pub fn new(origin: impl Into<String>, destinations: Vec<String>) -> Self {
        Self {
            origin: origin.into(),
            destinations,
        }
    }

    /// Check the request and return its trimmed labels, origin first.
    pub fn validate(&self, destination_count: usize) -> Result<Vec<String>, RequestError> {
        if self.destinations.len() != destination_count {
            return Err(RequestError::WrongCount {
                expected: destination_count,
                got: self.destinations.len(),
            });
        }

        let origin = self.origin.trim();
        if origin.is_empty() {
            return Err(RequestError::EmptyOrigin);
        }

        let mut labels = Vec::with_capacity(destination_count + 1);
        labels.push(origin.to_string());

        let mut seen = HashSet::new();
        for (index, destination) in self.destinations.iter().enumerate() {
            let label = destination.trim();
            if label.is_empty() {
                return Err(RequestError::EmptyDestination { index });
            }
            if !seen.insert(label) {
                return Err(RequestError::DuplicateDestination(label.to_string()));
            }
            labels.push(label.to_string());
        }

        Ok(labels)
    }
}

/// One hop of the winning order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub plan: Plan,
}

/// The result of a successful optimization.
#[derive(Debug, Clone)]
pub struct Optimized {
    /// Geocoded points; index 0 is the origin.
    pub points: Vec<Point>,

    pub order: VisitOrder,

    pub segments: Vec<Segment>,

    /// Human-readable remarks about degraded inputs.
    pub notes: Vec<String>,
}

impl Optimized {
    /// Labels in visiting order.
    pub fn ordered_labels(&self) -> Vec<&str> {
        self.order
            .order
            .iter()
            .map(|&i| self.points[i].label.as_str())
            .collect()
    }
}

/// Runs optimize requests against a geocoder, a trip planner and the
/// shared rail graph.
pub struct Optimizer<G, T> {
    geocoder: G,
    planner: T,
    rail: Arc<RailRouter>,
    aliases: AliasTable,
    config: OptimizerConfig,
}

impl<G: Geocoder, T: TransitPlanner> Optimizer<G, T> {
    pub fn new(
        geocoder: G,
        planner: T,
        rail: Arc<RailRouter>,
        aliases: AliasTable,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            geocoder,
            planner,
            rail,
            aliases,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn rail(&self) -> &RailRouter {
        &self.rail
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Geocode labels in order, pausing after each lookup.
    pub async fn locate(&self, labels: &[String]) -> Result<Vec<Point>, OptimizeError> {
        let mut points = Vec::with_capacity(labels.len());

        for label in labels {
            let (query, station) = self.aliases.resolve(label);
            let place = self
                .geocoder
                .geocode(&query)
                .await
                .map_err(|source| OptimizeError::Geocode {
                    label: label.clone(),
                    source,
                })?;
            debug!(%label, %query, station = ?station, "resolved label");

            points.push(Point {
                label: label.clone(),
                query,
                display: place.display,
                coord: place.coord,
                station,
            });

            if !self.config.geocode_pause.is_zero() {
                tokio::time::sleep(self.config.geocode_pause).await;
            }
        }

        Ok(points)
    }

    /// Find the fastest order to visit the request's destinations,
    /// departing at `at`.
    pub async fn optimize(
        &self,
        request: &OptimizeRequest,
        at: NaiveDateTime,
    ) -> Result<Optimized, OptimizeError> {
        let labels = request.validate(self.config.destination_count)?;
        let points = self.locate(&labels).await?;

        let selector = HybridSelector::new(&self.planner, &self.config.hybrid);
        let report = MatrixBuilder::new(selector, &self.rail, self.config.planner_pause)
            .build(&points, at)
            .await;

        let order = best_order(&report.matrix, 0).ok_or(OptimizeError::NoOrder)?;
        let segments = order
            .pairs()
            .filter_map(|(from, to)| {
                let plan = report.matrix.plan(from, to)?.clone();
                Some(Segment { from, to, plan })
            })
            .collect();

        info!(
            origin = %points[0].label,
            total_secs = order.total_secs,
            "optimized visiting order"
        );

        Ok(Optimized {
            notes: notes(&report),
            points,
            order,
            segments,
        })
    }
}

/// Remarks describing which inputs were missing while pricing.
fn notes(report: &MatrixReport) -> Vec<String> {
    let mut notes = Vec::new();
    let pairs = report.pair_count();

    if pairs > 0 && report.transit_failures == pairs {
        notes.push(
            "The trip planner returned no itineraries; results use rail and walking only."
                .to_string(),
        );
    } else if report.transit_failures > 0 {
        notes.push(format!(
            "The trip planner had no itinerary for {} of {} legs.",
            report.transit_failures, pairs
        ));
    }

    if report.rail_unavailable {
        notes.push("The rail network could not be loaded; rail was not considered.".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::domain::{CandidateKind, Coord};
    use crate::geocode::hong_kong_aliases;
    use crate::planner::matrix::CostMatrix;
    use crate::planner::mock::{StubGeocoder, TablePlanner, departure};
    use crate::rail::RailConfig;

    fn request(origin: &str, destinations: &[&str]) -> OptimizeRequest {
        OptimizeRequest::new(origin, destinations.iter().map(|s| s.to_string()).collect())
    }

    fn quiet() -> OptimizerConfig {
        OptimizerConfig::default().with_pauses(Duration::ZERO, Duration::ZERO)
    }

    /// Six places along a meridian, 0.05° (about 5.5 km) apart.
    const LINE: [(&str, f64, f64); 6] = [
        ("Start", 22.20, 114.17),
        ("One", 22.25, 114.17),
        ("Two", 22.30, 114.17),
        ("Three", 22.35, 114.17),
        ("Four", 22.40, 114.17),
        ("Five", 22.45, 114.17),
    ];

    /// Transit costs 600 s per step along the line.
    fn line_planner() -> TablePlanner {
        let mut secs = HashMap::new();
        for (i, a) in LINE.iter().enumerate() {
            for (j, b) in LINE.iter().enumerate() {
                let key = TablePlanner::key(&Coord::new(a.1, a.2), &Coord::new(b.1, b.2));
                secs.insert(key, 600 * i.abs_diff(j) as u32);
            }
        }
        TablePlanner { secs }
    }

    fn optimizer(geocoder: StubGeocoder) -> Optimizer<StubGeocoder, TablePlanner> {
        Optimizer::new(
            geocoder,
            line_planner(),
            Arc::new(RailRouter::new(RailConfig::default())),
            hong_kong_aliases(),
            quiet(),
        )
    }

    #[test]
    fn validate_trims_labels() {
        let labels = request(" 黃大仙站A2 ", &["a", " b", "c ", "d", "e"])
            .validate(5)
            .unwrap();
        assert_eq!(labels, vec!["黃大仙站A2", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn validate_rejects_bad_requests() {
        assert_eq!(
            request("o", &["a", "b"]).validate(5),
            Err(RequestError::WrongCount {
                expected: 5,
                got: 2
            })
        );
        assert_eq!(
            request("  ", &["a", "b", "c", "d", "e"]).validate(5),
            Err(RequestError::EmptyOrigin)
        );
        assert_eq!(
            request("o", &["a", "", "c", "d", "e"]).validate(5),
            Err(RequestError::EmptyDestination { index: 1 })
        );
        assert_eq!(
            request("o", &["a", "b", "c", "d", " a "]).validate(5),
            Err(RequestError::DuplicateDestination("a".to_string()))
        );
    }

    #[tokio::test]
    async fn duplicate_rejected_before_geocoding() {
        let optimizer = optimizer(StubGeocoder::new(&LINE));
        let err = optimizer
            .optimize(
                &request("Start", &["One", "Two", "Two", "Four", "Five"]),
                departure(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OptimizeError::Request(RequestError::DuplicateDestination(_))));
        assert!(optimizer.geocoder().queries().is_empty());
    }

    #[tokio::test]
    async fn finds_order_along_line() {
        let optimizer = optimizer(StubGeocoder::new(&LINE));
        let result = optimizer
            .optimize(
                &request("Start", &["Four", "Two", "Five", "One", "Three"]),
                departure(),
            )
            .await
            .unwrap();

        assert_eq!(
            optimizer.geocoder().queries(),
            vec!["Start", "Four", "Two", "Five", "One", "Three"]
        );
        assert_eq!(
            result.ordered_labels(),
            vec!["Start", "One", "Two", "Three", "Four", "Five"]
        );
        assert_eq!(result.order.total_secs, 3000);
        assert_eq!(result.segments.len(), 5);
        assert!(result.segments.iter().all(|s| s.plan.kind == CandidateKind::Transit));
        assert_eq!(result.segments[0].from, 0);
        assert!(result.notes.is_empty());
        // No stations were involved, so the graph was never needed.
        assert!(!optimizer.rail().is_loaded());
    }

    #[tokio::test]
    async fn aliases_expand_queries() {
        let optimizer = optimizer(StubGeocoder::new(&[
            ("Wong Tai Sin Station, Hong Kong", 22.3417, 114.1939),
            ("Tai Po Centre, Hong Kong", 22.4445, 114.1704),
        ]));

        let points = optimizer
            .locate(&["黃大仙站A2".to_string(), "大埔中心".to_string()])
            .await
            .unwrap();

        assert_eq!(points[0].label, "黃大仙站A2");
        assert_eq!(points[0].query, "Wong Tai Sin Station, Hong Kong");
        assert_eq!(points[0].station.as_ref().unwrap().as_str(), "WTS");
        assert_eq!(points[1].station.as_ref().unwrap().as_str(), "TAP");
        assert_eq!(points[1].display, "Tai Po Centre, Hong Kong, Hong Kong");
    }

    #[tokio::test]
    async fn geocode_failure_names_label() {
        let optimizer = optimizer(StubGeocoder::new(&LINE[..3]));
        let err = optimizer
            .optimize(
                &request("Start", &["One", "Two", "Nowhere", "Four", "Five"]),
                departure(),
            )
            .await
            .unwrap_err();

        match err {
            OptimizeError::Geocode { label, .. } => assert_eq!(label, "Nowhere"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(optimizer.geocoder().queries().len(), 4);
    }

    #[test]
    fn notes_describe_degraded_inputs() {
        let report = |transit_failures, rail_unavailable| MatrixReport {
            matrix: CostMatrix::new(3),
            transit_failures,
            rail_unavailable,
        };

        assert!(notes(&report(0, false)).is_empty());
        assert_eq!(
            notes(&report(2, false)),
            vec!["The trip planner had no itinerary for 2 of 6 legs."]
        );

        let all = notes(&report(6, true));
        assert_eq!(all.len(), 2);
        assert!(all[0].contains("no itineraries"));
        assert!(all[1].contains("rail"));
    }
}
