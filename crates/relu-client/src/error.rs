//! Client error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type.
///
/// Every failure surfaced by the SDK is one of these variants. HTTP status
/// failures and transport failures are kept apart so callers can tell
/// "the server rejected the request" from "the request never arrived".
#[derive(Debug, Error)]
pub enum Error {
    /// The server rejected the payload shape or content (400, 422).
    #[error("Validation failed ({status}): {message}")]
    Validation {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
        /// Structured error body, if the server sent one.
        details: Option<serde_json::Value>,
    },

    /// The credential was rejected (401, 403).
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
        /// Structured error body, if the server sent one.
        details: Option<serde_json::Value>,
    },

    /// The requested resource does not exist (404).
    #[error("Not found: {message}")]
    NotFound {
        /// Error message from the server.
        message: String,
        /// Structured error body, if the server sent one.
        details: Option<serde_json::Value>,
    },

    /// The server failed to handle the request (5xx).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
        /// Structured error body, if the server sent one.
        details: Option<serde_json::Value>,
    },

    /// Any other non-success status (409, 429, ...).
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
        /// Structured error body, if the server sent one.
        details: Option<serde_json::Value>,
    },

    /// The request never produced an HTTP response (connect, DNS, timeout, reset).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map a non-success HTTP status to its error kind.
    pub fn from_status(status: u16, message: String, details: Option<serde_json::Value>) -> Self {
        match status {
            400 | 422 => Error::Validation {
                status,
                message,
                details,
            },
            401 | 403 => Error::Authentication {
                status,
                message,
                details,
            },
            404 => Error::NotFound { message, details },
            500..=599 => Error::Server {
                status,
                message,
                details,
            },
            _ => Error::Api {
                status,
                message,
                details,
            },
        }
    }

    /// HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Validation { status, .. }
            | Error::Authentication { status, .. }
            | Error::Server { status, .. }
            | Error::Api { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Structured error body returned by the server, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Validation { details, .. }
            | Error::Authentication { details, .. }
            | Error::NotFound { details, .. }
            | Error::Server { details, .. }
            | Error::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Server { .. })
    }

    /// Check if the request failed before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Whether a caller-driven retry could plausibly succeed.
    ///
    /// The SDK itself never retries.
    pub fn is_retryable(&self) -> bool {
        self.is_server_error() || self.is_transport() || self.is_rate_limited()
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Build an error from a failed response's status and raw body.
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    let details: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let message = details
        .as_ref()
        .and_then(message_from_details)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
    Error::from_status(status.as_u16(), message, details)
}

/// Pull a human-readable message out of a JSON error body.
fn message_from_details(details: &serde_json::Value) -> Option<String> {
    ["message", "detail", "error"].iter().find_map(|key| {
        match details.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        let err = |s| Error::from_status(s, "x".to_string(), None);

        assert!(err(400).is_validation());
        assert!(err(422).is_validation());
        assert!(err(401).is_auth_error());
        assert!(err(403).is_auth_error());
        assert!(err(404).is_not_found());
        assert!(err(500).is_server_error());
        assert!(err(503).is_server_error());
        assert!(matches!(err(409), Error::Api { status: 409, .. }));
        assert!(err(429).is_rate_limited());
    }

    #[test]
    fn test_retryable() {
        assert!(Error::from_status(502, String::new(), None).is_retryable());
        assert!(!Error::from_status(400, String::new(), None).is_retryable());
        assert!(!Error::from_status(401, String::new(), None).is_retryable());
    }

    #[test]
    fn test_message_from_fastapi_detail() {
        let err = error_from_body(
            StatusCode::NOT_FOUND,
            br#"{"detail": "Thread not found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Thread not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_message_from_nested_error() {
        let err = error_from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"error": {"message": "name is required", "field": "name"}}"#,
        );
        match err {
            Error::Validation {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "name is required");
                assert_eq!(details.unwrap()["error"]["field"], json!("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_message_falls_back_to_reason() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert!(err.is_server_error());
        assert!(err.details().is_none());
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }
}
