//! Error taxonomy for calls to the remote API.
//!
//! Errors are classified only at the HTTP layer; the dashboard shows them
//! in an alert and lets the user retry by hand.

use serde_json::Value;
use thiserror::Error;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server (offline, CORS, aborted).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered but the body could not be decoded.
    #[error("Invalid server response: {0}")]
    Parse(String),

    #[error("Session expired. Please log in again.")]
    Unauthorized,

    #[error("{message}")]
    Http { status: u16, message: String },

    /// Client-side validation failure; no request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify a non-success response.
    ///
    /// The message is taken from the JSON body (`message`, then `error`)
    /// and falls back to a generic text with the status code.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }

        let message = extract_message(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        Self::Http { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Short heading for the alert dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Network(_) => "Network error",
            Self::Parse(_) => "Unexpected response",
            Self::Unauthorized => "Session expired",
            Self::Http { status, .. } if *status >= 500 => "Server error",
            Self::Http { .. } => "Request rejected",
            Self::Validation(_) => "Validation error",
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let err = ApiError::from_response(401, r#"{"message":"jwt expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn test_message_from_body() {
        let err = ApiError::from_response(400, r#"{"message":"Proposal already approved"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: "Proposal already approved".to_string()
            }
        );

        let err = ApiError::from_response(404, r#"{"error":"Not found"}"#);
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_generic_fallback() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");
        assert_eq!(err.title(), "Server error");

        let err = ApiError::from_response(500, r#"{"message":"   "}"#);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }
}
