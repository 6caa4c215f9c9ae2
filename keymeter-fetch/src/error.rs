//! Fetch error types.

use keymeter_core::CoreError;
use thiserror::Error;

/// Longest response body kept in an [`FetchError::Http`] message.
const MAX_ERROR_BODY_CHARS: usize = 512;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a single usage fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body (possibly shortened).
        body: String,
    },

    /// The body is not JSON or lacks required fields.
    #[error("Unexpected response format: {0}")]
    Protocol(String),

    /// The request could not be built (bad header value, blocked URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Creates an HTTP status error, shortening very long bodies.
    pub fn http(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body = if body.chars().count() > MAX_ERROR_BODY_CHARS {
            let mut short: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            short.push('…');
            short
        } else {
            body.to_string()
        };
        Self::Http { status, body }
    }

    /// Returns the HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Protocol(format!("invalid JSON: {err}"))
    }
}

impl From<CoreError> for FetchError {
    fn from(err: CoreError) -> Self {
        FetchError::Protocol(err.to_string())
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Request(e) => FetchError::Network(e.to_string()),
            HttpError::DomainNotAllowed(_) | HttpError::InvalidUrl(_) => {
                FetchError::InvalidRequest(err.to_string())
            }
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_contains_status() {
        let err = FetchError::http(401, r#"{"error":{"message":"No auth credentials found"}}"#);
        let message = err.to_string();
        assert!(message.starts_with("HTTP 401: "));
        assert!(message.contains("No auth credentials found"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_http_error_body_shortened() {
        let body = "x".repeat(2000);
        let FetchError::Http { body, .. } = FetchError::http(500, &body) else {
            panic!("expected Http variant");
        };
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(body.ends_with('…'));
    }

    #[test]
    fn test_status_only_for_http() {
        assert_eq!(FetchError::http(502, "").status(), Some(502));
        assert_eq!(FetchError::Protocol("x".to_string()).status(), None);
    }

    #[test]
    fn test_domain_error_maps_to_invalid_request() {
        let err: FetchError = HttpError::DomainNotAllowed("evil.com".to_string()).into();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn test_json_error_maps_to_protocol() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Protocol(_)));
    }
}
