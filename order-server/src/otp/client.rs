//! OpenTripPlanner HTTP client.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{Coord, Plan};
use crate::planner::TransitPlanner;

use super::error::TransitError;
use super::types::PlanResponse;

/// Default base URL: a planner running locally.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const USER_AGENT: &str = "hk-transit-optimizer/0.1 (contact: local)";

/// Configuration for the trip planner client.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Base URL of the planner
    pub base_url: String,
    /// Router id in the `/otp/routers/{id}/plan` path
    pub router: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OtpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            router: "default".to_string(),
            timeout_secs: 20,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the router id.
    pub fn with_router(mut self, router: impl Into<String>) -> Self {
        self.router = router.into();
        self
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the planner's `/plan` endpoint.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    plan_url: String,
}

impl OtpClient {
    pub fn new(config: OtpConfig) -> Result<Self, TransitError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            plan_url: format!(
                "{}/otp/routers/{}/plan",
                config.base_url.trim_end_matches('/'),
                config.router
            ),
        })
    }

    /// Best walk + transit itinerary between two coordinates, departing `at`.
    pub async fn plan(
        &self,
        from: &Coord,
        to: &Coord,
        at: NaiveDateTime,
    ) -> Result<Plan, TransitError> {
        let response = self
            .http
            .get(&self.plan_url)
            .query(&plan_query(from, to, at))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransitError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let parsed: PlanResponse = serde_json::from_str(&body).map_err(|e| TransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let plan = parsed
            .first_itinerary()
            .ok_or(TransitError::NoItinerary)?
            .into_plan();
        debug!(secs = plan.duration_secs, legs = plan.legs.len(), "planner itinerary");
        Ok(plan)
    }
}

/// Query parameters for a `/plan` request.
fn plan_query(from: &Coord, to: &Coord, at: NaiveDateTime) -> Vec<(&'static str, String)> {
    vec![
        ("fromPlace", from.to_place_param()),
        ("toPlace", to.to_place_param()),
        ("mode", "WALK,TRANSIT".to_string()),
        ("numItineraries", "1".to_string()),
        ("date", at.format("%Y-%m-%d").to_string()),
        ("time", at.format("%H:%M").to_string()),
    ]
}

impl TransitPlanner for OtpClient {
    async fn plan(
        &self,
        from: &Coord,
        to: &Coord,
        at: NaiveDateTime,
    ) -> Result<Plan, TransitError> {
        OtpClient::plan(self, from, to, at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn config_builder() {
        let config = OtpConfig::new("http://otp:8080/")
            .with_timeout(5)
            .with_router("hk");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.router, "hk");

        let client = OtpClient::new(config).unwrap();
        assert_eq!(client.plan_url, "http://otp:8080/otp/routers/hk/plan");
    }

    #[test]
    fn config_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.router, "default");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn query_parameters() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap();
        let query = plan_query(&Coord::new(22.34, 114.19), &Coord::new(22.45, 114.16), at);

        let get = |k: &str| query.iter().find(|(name, _)| *name == k).unwrap().1.clone();
        assert_eq!(get("fromPlace"), "22.34,114.19");
        assert_eq!(get("toPlace"), "22.45,114.16");
        assert_eq!(get("mode"), "WALK,TRANSIT");
        assert_eq!(get("numItineraries"), "1");
        assert_eq!(get("date"), "2026-10-19");
        assert_eq!(get("time"), "09:05");
    }
}
