//! The seam between the panel and the users API.

use async_trait::async_trait;
use roster_client::{DeleteMode, ListQuery, NewUser, Result, User, UserPage, UsersClient};

/// Operations the panel needs from a users backend.
///
/// [`UsersClient`] is the production implementation; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBackend: Send + Sync {
    async fn list_users(&self, query: &ListQuery) -> Result<UserPage>;

    async fn get_user(&self, id: i64) -> Result<User>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn delete_user(&self, id: i64, mode: DeleteMode) -> Result<()>;
}

#[async_trait]
impl UserBackend for UsersClient {
    async fn list_users(&self, query: &ListQuery) -> Result<UserPage> {
        UsersClient::list_users(self, query).await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        UsersClient::get_user(self, id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        UsersClient::create_user(self, user).await
    }

    async fn delete_user(&self, id: i64, mode: DeleteMode) -> Result<()> {
        UsersClient::delete_user(self, id, mode).await
    }
}
