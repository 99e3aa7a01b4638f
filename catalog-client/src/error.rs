//! Client error types

use serde_json::Value;
use shared::{ErrorBody, FieldErrors};
use thiserror::Error;

/// Client error type
///
/// Every failure the transport can produce, unified into one value:
/// - no response at all -> [`ClientError::Http`] / [`ClientError::Internal`]
/// - non-2xx response -> [`ClientError::Api`], optionally carrying field errors
/// - 2xx response that does not decode -> [`ClientError::InvalidResponse`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed JSON body, or the raw text when it was not JSON
        body: Option<Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response body.
    ///
    /// JSON bodies are decoded for a message; anything else is kept as raw
    /// text and the message falls back to `HTTP Error {status}`.
    pub fn from_response(status: u16, bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::Api {
                status,
                message: ErrorBody::from_value(&value).message_or_status(status),
                body: Some(value),
            },
            Err(_) => {
                let text = String::from_utf8_lossy(bytes).trim().to_string();
                Self::Api {
                    status,
                    message: format!("HTTP Error {}", status),
                    body: (!text.is_empty()).then_some(Value::String(text)),
                }
            }
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Per-field validation messages carried by an API error body
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Api {
                body: Some(body), ..
            } => ErrorBody::from_value(body).field_errors,
            _ => None,
        }
    }

    /// Whether the request never reached the server
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(e) if e.status().is_none())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_detail_string() {
        let err = ClientError::from_response(404, br#"{"detail":"Category not found"}"#);
        assert_eq!(err.to_string(), "Category not found");
        assert_eq!(err.status(), Some(404));
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_from_response_field_errors() {
        let err = ClientError::from_response(
            400,
            br#"{"detail":{"errors":{"category_id":"Category ID not found"}}}"#,
        );
        assert_eq!(err.to_string(), "HTTP Error 400");
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["category_id"], "Category ID not found");
    }

    #[test]
    fn test_from_response_raw_text() {
        let err = ClientError::from_response(502, b"Bad Gateway\n");
        assert_eq!(err.to_string(), "HTTP Error 502");
        match err {
            ClientError::Api { body, .. } => assert_eq!(body, Some(json!("Bad Gateway"))),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ClientError::from_response(500, b"");
        assert_eq!(err.to_string(), "HTTP Error 500");
        assert!(matches!(err, ClientError::Api { body: None, .. }));
    }

    #[test]
    fn test_non_api_errors_have_no_status() {
        let err = ClientError::InvalidResponse("empty".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_transport());
    }
}
