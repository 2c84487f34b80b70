//! User-facing outcome of a form submission.

use std::fmt;

use crate::client::ApiResult;
use crate::client::error::field_text;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Submitted successfully!";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Success uses the body's `message` field; errors use the error message.
    /// Both fall back to a generic sentence when their source is empty.
    pub fn from_submission(result: &ApiResult) -> Self {
        match result {
            Ok(data) => Self {
                level: NoticeLevel::Success,
                message: field_text(data, "message")
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            },
            Err(e) => Self {
                level: NoticeLevel::Error,
                message: if e.message().is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    e.message().to_string()
                },
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
        };
        write!(f, "{icon} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use serde_json::json;

    #[test]
    fn success_uses_body_message() {
        let n = Notice::from_submission(&Ok(json!({"message": "Contact query submitted successfully"})));
        assert!(n.is_success());
        assert_eq!(n.message, "Contact query submitted successfully");
    }

    #[test]
    fn success_without_message_uses_default() {
        let n = Notice::from_submission(&Ok(json!({"id": 7})));
        assert_eq!(n.message, DEFAULT_SUCCESS_MESSAGE);

        let n = Notice::from_submission(&Ok(json!({"message": ""})));
        assert_eq!(n.message, DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn error_uses_error_message() {
        let n = Notice::from_submission(&Err(ClientError::from_status(400, &json!({"error": "No data provided"}))));
        assert_eq!(n.level, NoticeLevel::Error);
        assert_eq!(n.message, "No data provided");
    }

    #[test]
    fn empty_error_message_uses_default() {
        let n = Notice::from_submission(&Err(ClientError::Network(String::new())));
        assert_eq!(n.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(n.to_string(), format!("✗ {DEFAULT_ERROR_MESSAGE}"));
    }
}
