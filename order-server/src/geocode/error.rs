//! Geocoding error types.

/// Errors that can occur while resolving an address.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Geocoder returned an error status
    #[error("geocode failed: status {status}")]
    Api { status: u16 },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The geocoder had no match for the query
    #[error("geocode no results for: {0}")]
    NoResults(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NoResults("Nowhere".into());
        assert_eq!(err.to_string(), "geocode no results for: Nowhere");

        let err = GeocodeError::Api { status: 503 };
        assert_eq!(err.to_string(), "geocode failed: status 503");
    }
}
