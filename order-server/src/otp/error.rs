//! Trip planner client error types.

use std::fmt;

/// Errors from the trip planner HTTP client.
#[derive(Debug)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Planner returned an error status code
    ApiError { status: u16, message: String },

    /// Planner answered but found no itinerary
    NoItinerary,
}

impl TransitError {
    /// Whether the failure was the request timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransitError::Http(e) if e.is_timeout())
    }
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitError::Http(e) => write!(f, "HTTP error: {e}"),
            TransitError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TransitError::ApiError { status, message } => {
                write!(f, "otp plan failed: {status} {message}")
            }
            TransitError::NoItinerary => write!(f, "otp no itinerary"),
        }
    }
}

impl std::error::Error for TransitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransitError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransitError {
    fn from(err: reqwest::Error) -> Self {
        TransitError::Http(err)
    }
}
