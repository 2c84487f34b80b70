//! Per-call error taxonomy.
//!
//! Every variant carries a human-readable message; the UI layer shows it
//! verbatim, so it must never be empty.

use serde_json::Value;
use thiserror::Error;

/// Message used when the timer wins the race against the network.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";

/// Message used when the client's cancellation token fires mid-call.
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response within the configured timeout; the request was dropped.
    #[error("{0}")]
    Timeout(String),
    /// The response body was not valid JSON (any status).
    #[error("{0}")]
    InvalidResponse(String),
    /// Non-2xx status with a parseable body.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Transport-level failure: connect, DNS, TLS, reset.
    #[error("{0}")]
    Network(String),
    /// The client's cancellation token fired before the call settled.
    #[error("{0}")]
    Cancelled(String),
    /// The request could not be built (bad header, unserializable body).
    #[error("{0}")]
    InvalidRequest(String),
}

/// Discriminant of [`ClientError`], for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    InvalidResponse,
    Api,
    Network,
    Cancelled,
    InvalidRequest,
}

impl ClientError {
    pub fn timeout() -> Self {
        ClientError::Timeout(TIMEOUT_MESSAGE.to_string())
    }

    pub fn cancelled() -> Self {
        ClientError::Cancelled(CANCELLED_MESSAGE.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            ClientError::Api { .. } => ErrorKind::Api,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Cancelled(_) => ErrorKind::Cancelled,
            ClientError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Timeout(m)
            | ClientError::InvalidResponse(m)
            | ClientError::Network(m)
            | ClientError::Cancelled(m)
            | ClientError::InvalidRequest(m) => m,
            ClientError::Api { message, .. } => message,
        }
    }

    /// HTTP status for [`ClientError::Api`], `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the `Api` error for a non-success response whose body parsed.
    ///
    /// The message is the body's `error` field, then its `message` field,
    /// then `HTTP Error: {status}`.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = field_text(body, "error")
            .or_else(|| field_text(body, "message"))
            .unwrap_or_else(|| format!("HTTP Error: {status}"));
        ClientError::Api { status, message }
    }
}

/// Text of `body[key]` when that value is truthy.
///
/// Strings are used as-is; other truthy values (non-zero numbers, `true`,
/// arrays, objects) are rendered as JSON text.
pub(crate) fn field_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_field_wins_over_message() {
        let e = ClientError::from_status(400, &json!({"error": "bad email", "message": "ignored"}));
        assert_eq!(e.kind(), ErrorKind::Api);
        assert_eq!(e.message(), "bad email");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn message_field_used_when_error_missing() {
        let e = ClientError::from_status(404, &json!({"message": "Project not found"}));
        assert_eq!(e.message(), "Project not found");
    }

    #[test]
    fn falsy_error_falls_through_to_message() {
        let e = ClientError::from_status(500, &json!({"error": "", "message": "db down"}));
        assert_eq!(e.message(), "db down");

        let e = ClientError::from_status(500, &json!({"error": null, "message": "db down"}));
        assert_eq!(e.message(), "db down");
    }

    #[test]
    fn generic_message_when_no_fields() {
        let e = ClientError::from_status(502, &json!({}));
        assert_eq!(e.message(), "HTTP Error: 502");

        let e = ClientError::from_status(503, &json!(["not", "an", "object"]));
        assert_eq!(e.message(), "HTTP Error: 503");
    }

    #[test]
    fn non_string_error_rendered_as_json() {
        let e = ClientError::from_status(422, &json!({"error": {"email": "required"}}));
        assert_eq!(e.message(), r#"{"email":"required"}"#);

        let e = ClientError::from_status(422, &json!({"error": 0, "message": "zero skipped"}));
        assert_eq!(e.message(), "zero skipped");
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(ClientError::timeout().to_string(), TIMEOUT_MESSAGE);
        assert_eq!(ClientError::cancelled().kind(), ErrorKind::Cancelled);
        assert_eq!(ClientError::Network("connection refused".into()).status(), None);
    }
}
