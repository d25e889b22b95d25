//! Caching layer for geocoding results.
//!
//! The public geocoder rate-limits aggressively and users tend to submit
//! the same handful of places, so successful lookups are cached by query
//! text. Failures are never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::geocode::{GeocodeError, Geocoder, NominatimClient, Place};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 1000,
        }
    }
}

/// A geocoder with a result cache in front of it.
pub struct CachedGeocoder<G = NominatimClient> {
    inner: G,
    places: MokaCache<String, Place>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    #[cfg(test)]
    async fn contains(&self, query: &str) -> bool {
        self.places.get(query).await.is_some()
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError> {
        if let Some(place) = self.places.get(query).await {
            trace!(query, "geocode cache hit");
            return Ok(place);
        }

        let place = self.inner.geocode(query).await?;
        self.places.insert(query.to_string(), place.clone()).await;
        Ok(place)
    }
}
