//! Types for Roster users API requests and responses.

use crate::error::{ClientError, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest page the backend accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Configuration for connecting to a users API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://127.0.0.1:5000")
    pub url: String,
    /// Path of the users collection, appended to `url`
    pub api_prefix: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default `/api/users` prefix.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_prefix: "/api/users".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Use a different collection path (e.g. `/users` for legacy servers).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

// =============================================================================
// User Types
// =============================================================================

/// A user as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Build a request from raw form input, trimming both fields.
    pub fn trimmed(name: &str, email: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}

/// Partial update; `None` fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// How a delete request should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Mark the user inactive
    #[default]
    Soft,
    /// Remove the row
    Hard,
}

impl DeleteMode {
    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            DeleteMode::Soft => "true",
            DeleteMode::Hard => "false",
        }
    }
}

// =============================================================================
// Listing Types
// =============================================================================

/// Pagination and search parameters for the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            search: None,
        }
    }
}

impl ListQuery {
    /// First page with the given size.
    pub fn first_page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            search: None,
        }
    }

    /// Check the same bounds the server enforces.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ClientError::Validation(
                "page must be >= 1".to_string(),
            ));
        }
        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Err(ClientError::Validation(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        Ok(())
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        pairs
    }
}

/// Pagination info attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub has_next: Option<bool>,
    #[serde(default)]
    pub has_prev: Option<bool>,
}

/// One page of users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub metadata: Option<PageMetadata>,
}

impl UserPage {
    /// Total reported by the server, or the number of users on this page.
    pub fn total(&self) -> u64 {
        self.metadata
            .as_ref()
            .and_then(|m| m.total)
            .unwrap_or(self.users.len() as u64)
    }
}

/// Format a server timestamp for display.
///
/// Accepts RFC 3339 and naive ISO datetimes; anything else is shown as-is.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }

    raw.to_string()
}
