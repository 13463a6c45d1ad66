//! Routing API error types.

/// Errors from the OpenRouteService HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OrsError {
    /// HTTP request failed (network error, closed connection, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (check ORS_API_KEY)")]
    Unauthorized,

    /// API key contains characters not allowed in a header
    #[error("invalid API key format")]
    InvalidApiKey,

    /// Matrix response had no `durations` rows
    #[error("duration matrix missing from response")]
    MissingDurations,

    /// Directions response had no usable geometry
    #[error("invalid route geometry: {0}")]
    InvalidGeometry(&'static str),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
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

        assert_eq!(
            OrsError::InvalidGeometry("no features").to_string(),
            "invalid route geometry: no features"
        );
    }
}
