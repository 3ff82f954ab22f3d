//! Structured errors for backend requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of backend errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Connection failure or request timeout
    Timeout,
    /// Failed to parse a response body
    Parse,
    /// Service-level error reported by the backend
    ApiError,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteErrorKind::HttpStatus => write!(f, "http_status"),
            RemoteErrorKind::Timeout => write!(f, "timeout"),
            RemoteErrorKind::Parse => write!(f, "parse"),
            RemoteErrorKind::ApiError => write!(f, "api_error"),
        }
    }
}

/// Structured error from the backend with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteError {
    /// Error category
    pub kind: RemoteErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl RemoteError {
    /// Creates a new backend error.
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error.
    ///
    /// Pulls the service's own message out of a JSON error body when one
    /// is present, so the summary reads like the backend wrote it.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(msg) = extract_service_message(&json)
            {
                return Self {
                    kind: RemoteErrorKind::HttpStatus,
                    message: format!("HTTP {status}: {msg}"),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: RemoteErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Timeout, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Parse, message)
    }
}

/// Pulls a human-readable message out of a service error body.
///
/// The auth API reports errors as `msg` or `error_description`, the data
/// API as `message`. A bare `error` string is the last resort.
fn extract_service_message(json: &Value) -> Option<&str> {
    for key in ["msg", "message", "error_description"] {
        if let Some(msg) = json.get(key).and_then(Value::as_str) {
            return Some(msg);
        }
    }
    json.get("error").and_then(Value::as_str)
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RemoteError {}

/// Result type for backend operations.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Auth API error bodies carry the message under `msg`.
    #[test]
    fn test_http_status_extracts_auth_message() {
        let err = RemoteError::http_status(400, r#"{"code":400,"msg":"Invalid login credentials"}"#);

        assert_eq!(err.kind, RemoteErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 400: Invalid login credentials");
        assert!(err.details.is_some());
    }

    /// Data API error bodies carry the message under `message`.
    #[test]
    fn test_http_status_extracts_data_api_message() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy"}"#;
        let err = RemoteError::http_status(403, body);

        assert_eq!(
            err.message,
            "HTTP 403: new row violates row-level security policy"
        );
    }

    /// OAuth-style bodies fall back to `error_description`.
    #[test]
    fn test_http_status_extracts_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        let err = RemoteError::http_status(400, body);

        assert_eq!(err.message, "HTTP 400: Email not confirmed");
    }

    /// Non-JSON bodies stay in details, summary is just the status.
    #[test]
    fn test_http_status_plain_body() {
        let err = RemoteError::http_status(502, "Bad Gateway");

        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("Bad Gateway"));
    }

    /// Empty bodies produce no details.
    #[test]
    fn test_http_status_empty_body() {
        let err = RemoteError::http_status(500, "");

        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details, None);
    }

    /// Display prints the one-line summary only.
    #[test]
    fn test_display_is_message() {
        let err = RemoteError::timeout("Request timed out: deadline elapsed");
        assert_eq!(err.to_string(), "Request timed out: deadline elapsed");
    }
}
