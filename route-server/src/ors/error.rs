//! ORS client error types.

use crate::planner::DirectionsError;

/// Errors from the OpenRouteService HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OrsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No route between the requested points
    #[error("no route found")]
    NoRoute,

    /// Rate limited by the API
    #[error("rate limited by ORS API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}

impl From<OrsError> for DirectionsError {
    fn from(err: OrsError) -> Self {
        match err {
            OrsError::NoRoute => DirectionsError::NoRoute,
            other => DirectionsError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OrsError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = OrsError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");

        let err = OrsError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }

    #[test]
    fn converts_to_directions_error() {
        assert!(matches!(
            DirectionsError::from(OrsError::NoRoute),
            DirectionsError::NoRoute
        ));

        match DirectionsError::from(OrsError::RateLimited) {
            DirectionsError::Unavailable(msg) => assert!(msg.contains("rate limited")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
