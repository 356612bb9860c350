//! Error types for the Roster users client.

use thiserror::Error;

/// Errors that can occur when talking to the users API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, broken body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status and no structured error
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server sent a structured `{ error, details }` payload
    #[error("{message}")]
    ServerReported {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Request rejected before it was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// True for a 404 on a single-record lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } | ClientError::ServerReported { status, .. } => {
                Some(*status)
            }
            ClientError::NotFound(_) => Some(404),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text the server itself supplied for this failure.
    ///
    /// Prefers the `error` field; falls back to the serialized `details`
    /// object when the server only sent field-level validation messages.
    pub fn server_text(&self) -> Option<String> {
        match self {
            ClientError::ServerReported {
                message, details, ..
            } => {
                if !message.is_empty() {
                    Some(message.clone())
                } else {
                    details.as_ref().map(|d| d.to_string())
                }
            }
            _ => None,
        }
    }
}

/// Result type for users client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
