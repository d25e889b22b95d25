//! Nominatim search client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Coord;

use super::error::GeocodeError;
use super::{Geocoder, Place};

/// Default base URL: the public OpenStreetMap Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = "hk-transit-optimizer/0.1 (contact: local)";

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl SearchHit {
    fn into_place(self) -> Result<Place, GeocodeError> {
        let parse = |s: &str, what: &str| {
            s.trim().parse::<f64>().map_err(|_| GeocodeError::Json {
                message: format!("invalid {what}: {s}"),
            })
        };
        Ok(Place {
            coord: Coord::new(parse(&self.lat, "latitude")?, parse(&self.lon, "longitude")?),
            display: self.display_name,
        })
    }
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL of the Nominatim instance
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 15,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for Nominatim's `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for `query`, returning the best match.
    pub async fn search(&self, query: &str) -> Result<Place, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults(query.to_string()))?;

        let place = hit.into_place()?;
        debug!(query, lat = place.coord.lat, lon = place.coord.lon, "geocoded");
        Ok(place)
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        self.search(query).await
    }
}
