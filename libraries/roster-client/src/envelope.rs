//! Response envelope handling.
//!
//! The users API wraps payloads as `{ success, data, error, metadata }`, but
//! older deployments return the bare JSON value. Both decode into
//! [`Envelope`] and are normalized into a single [`Payload`].

use crate::error::{ClientError, Result};
use crate::types::PageMetadata;
use serde::Deserialize;

/// A response body in either of the two shapes the server may send.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped(Wrapped<T>),
    Direct(T),
}

/// The `{ success, ... }` shape.
#[derive(Debug, Deserialize)]
pub struct Wrapped<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// Normalized response contents.
#[derive(Debug)]
pub struct Payload<T> {
    pub data: Option<T>,
    pub metadata: Option<PageMetadata>,
    pub message: Option<String>,
}

impl<T> Payload<T> {
    /// The payload, or a parse error naming what was expected.
    pub fn require_data(self, what: &str) -> Result<T> {
        self.data
            .ok_or_else(|| ClientError::ParseError(format!("Response is missing {}", what)))
    }
}

impl<T> Envelope<T> {
    /// Collapse either shape into a [`Payload`].
    ///
    /// A wrapped body with `success: false` is a server-reported failure even
    /// when the HTTP status was 2xx.
    pub fn normalize(self, status: u16) -> Result<Payload<T>> {
        match self {
            Envelope::Direct(data) => Ok(Payload {
                data: Some(data),
                metadata: None,
                message: None,
            }),
            Envelope::Wrapped(w) if w.success => Ok(Payload {
                data: w.data,
                metadata: w.metadata,
                message: w.message,
            }),
            Envelope::Wrapped(w) => Err(ClientError::ServerReported {
                status,
                message: w.error.unwrap_or_default(),
                details: w.details,
            }),
        }
    }
}

/// Error body sent with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|b| b.error.is_some() || b.details.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;

    #[test]
    fn test_bare_array_is_direct() {
        let body = r#"[{"id": 1, "name": "Ann", "email": "ann@x.com"}]"#;
        let env: Envelope<Vec<User>> = serde_json::from_str(body).unwrap();
        assert!(matches!(env, Envelope::Direct(_)));

        let payload = env.normalize(200).unwrap();
        assert_eq!(payload.data.unwrap().len(), 1);
        assert!(payload.metadata.is_none());
    }

    #[test]
    fn test_bare_object_is_direct() {
        let body = r#"{"id": 3, "name": "Cy", "email": "cy@x.com", "is_active": true}"#;
        let env: Envelope<User> = serde_json::from_str(body).unwrap();
        let user = env.normalize(200).unwrap().require_data("user").unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.is_active, Some(true));
    }

    #[test]
    fn test_wrapped_with_metadata() {
        let body = r#"{
            "success": true,
            "data": [],
            "metadata": {"page": 1, "per_page": 100, "total": 0, "pages": 0,
                         "has_next": false, "has_prev": false}
        }"#;
        let env: Envelope<Vec<User>> = serde_json::from_str(body).unwrap();
        let payload = env.normalize(200).unwrap();
        assert_eq!(payload.data, Some(vec![]));
        assert_eq!(payload.metadata.unwrap().total, Some(0));
    }

    #[test]
    fn test_wrapped_failure_is_server_reported() {
        let body = r#"{"success": false, "error": "Validation error", "details": {"email": ["bad"]}}"#;
        let env: Envelope<User> = serde_json::from_str(body).unwrap();

        match env.normalize(200) {
            Err(ClientError::ServerReported {
                status,
                message,
                details,
            }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Validation error");
                assert!(details.is_some());
            }
            other => panic!("Expected ServerReported, got {:?}", other),
        }
    }

    #[test]
    fn test_wrapped_user_without_data_is_parse_error() {
        let body = r#"{"success": true, "message": "User created"}"#;
        let env: Envelope<User> = serde_json::from_str(body).unwrap();
        assert!(matches!(env, Envelope::Wrapped(Wrapped { data: None, .. })));

        let result = env.normalize(201).unwrap().require_data("user");
        assert!(matches!(result, Err(ClientError::ParseError(msg)) if msg.contains("user")));
    }

    #[test]
    fn test_wrapped_without_data() {
        let body = r#"{"success": true, "message": "User deleted"}"#;
        let env: Envelope<serde_json::Value> = serde_json::from_str(body).unwrap();
        let payload = env.normalize(200).unwrap();
        assert!(payload.data.is_none());
        assert_eq!(payload.message.as_deref(), Some("User deleted"));
        assert!(payload.require_data("user").is_err());
    }

    #[test]
    fn test_error_body_parse() {
        assert!(ErrorBody::parse("Internal Server Error").is_none());
        assert!(ErrorBody::parse("{}").is_none());

        let body = ErrorBody::parse(r#"{"error": "User 9 not found"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("User 9 not found"));
    }
}
