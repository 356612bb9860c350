//! Requests against the users collection.

use crate::envelope::{Envelope, ErrorBody, Payload};
use crate::error::{ClientError, Result};
use crate::types::{DeleteMode, ListQuery, NewUser, User, UserPage, UserUpdate};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Borrowed view over the HTTP client and collection URL.
pub(crate) struct UsersApi<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub(crate) async fn list(&self, query: &ListQuery) -> Result<UserPage> {
        debug!(url = %self.base_url, page = query.page, per_page = query.per_page, "Fetching users");

        let response = self
            .http
            .get(self.base_url)
            .query(&query.to_pairs())
            .send()
            .await?;

        let payload: Payload<Vec<User>> = read_payload(response, "users").await?;
        let page = UserPage {
            users: payload.data.unwrap_or_default(),
            metadata: payload.metadata,
        };

        debug!(users = page.users.len(), total = page.total(), "Fetched users");
        Ok(page)
    }

    pub(crate) async fn get(&self, id: i64) -> Result<User> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = id, "Fetching user");

        let response = self.http.get(&url).send().await?;
        read_payload(response, "user")
            .await
            .map_err(|e| with_not_found(e, id))?
            .require_data("user")
    }

    pub(crate) async fn create(&self, user: &NewUser) -> Result<User> {
        debug!(url = %self.base_url, email = %user.email, "Creating user");

        let response = self.http.post(self.base_url).json(user).send().await?;
        let created: User = read_payload(response, "user").await?.require_data("user")?;

        debug!(user_id = created.id, "User created");
        Ok(created)
    }

    pub(crate) async fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = id, "Updating user");

        let response = self.http.put(&url).json(update).send().await?;
        read_payload(response, "user")
            .await
            .map_err(|e| with_not_found(e, id))?
            .require_data("user")
    }

    pub(crate) async fn delete(&self, id: i64, mode: DeleteMode) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = id, mode = ?mode, "Deleting user");

        let response = self
            .http
            .delete(&url)
            .query(&[("soft", mode.as_query_value())])
            .send()
            .await?;

        let _: Payload<serde_json::Value> = read_payload(response, "delete").await?;
        debug!(user_id = id, "User deleted");
        Ok(())
    }
}

/// Turn a response into a normalized payload or a classified error.
async fn read_payload<T: DeserializeOwned>(response: Response, what: &str) -> Result<Payload<T>> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_for_status(status.as_u16(), &body));
    }

    // 204 and empty 200s carry nothing to decode
    if body.trim().is_empty() {
        return Ok(Payload {
            data: None,
            metadata: None,
            message: None,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        ClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })?;

    envelope.normalize(status.as_u16())
}

fn error_for_status(status: u16, body: &str) -> ClientError {
    let parsed = ErrorBody::parse(body);

    if status == 404 {
        let message = parsed.and_then(|b| b.error).unwrap_or_default();
        return ClientError::NotFound(message);
    }

    match parsed {
        Some(ErrorBody { error, details }) => {
            warn!(status, error = ?error, "Server reported an error");
            ClientError::ServerReported {
                status,
                message: error.unwrap_or_default(),
                details,
            }
        }
        None => ClientError::Http {
            status,
            message: body.to_string(),
        },
    }
}

fn with_not_found(err: ClientError, id: i64) -> ClientError {
    match err {
        ClientError::NotFound(msg) if msg.is_empty() => {
            ClientError::NotFound(format!("User {} not found", id))
        }
        other => other,
    }
}
