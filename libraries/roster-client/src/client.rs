//! Main Roster users client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, DeleteMode, ListQuery, NewUser, User, UserPage, UserUpdate};
use crate::users::UsersApi;
use reqwest::Client;

/// Client for a users REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, ListQuery, UsersClient};
///
/// let client = UsersClient::new(ClientConfig::new("http://127.0.0.1:5000"))?;
/// let page = client.list_users(&ListQuery::first_page(100)).await?;
/// println!("{} users", page.total());
/// ```
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    collection_url: String,
}

impl UsersClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let prefix = config.api_prefix.trim().trim_matches('/');
        let collection_url = if prefix.is_empty() {
            url
        } else {
            format!("{}/{}", url, prefix)
        };

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            collection_url,
        })
    }

    /// URL of the users collection, e.g. `http://host/api/users`.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn api(&self) -> UsersApi<'_> {
        UsersApi::new(&self.http, &self.collection_url)
    }

    /// Fetch one page of users.
    pub async fn list_users(&self, query: &ListQuery) -> Result<UserPage> {
        query.validate()?;
        self.api().list(query).await
    }

    /// Fetch a single user; a missing user is [`ClientError::NotFound`].
    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.api().get(id).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        if user.name.trim().is_empty() || user.email.trim().is_empty() {
            return Err(ClientError::Validation(
                "name and email are required".to_string(),
            ));
        }
        self.api().create(user).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(ClientError::Validation("nothing to update".to_string()));
        }
        self.api().update(id, update).await
    }

    /// Delete a user. [`DeleteMode::Soft`] only marks it inactive.
    pub async fn delete_user(&self, id: i64, mode: DeleteMode) -> Result<()> {
        self.api().delete(id, mode).await
    }
}
