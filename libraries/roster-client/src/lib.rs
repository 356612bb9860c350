//! Roster Users Client
//!
//! HTTP client library for a users REST API.
//!
//! # Features
//!
//! - **Listing**: paginated, searchable user listing with metadata
//! - **CRUD**: fetch, create, update and (soft-)delete single users
//! - **Envelopes**: accepts both `{ success, data }` wrapped bodies and bare JSON
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, ListQuery, NewUser, UsersClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UsersClient::new(ClientConfig::new("http://127.0.0.1:5000"))?;
//!
//!     let created = client.create_user(&NewUser::trimmed("Ann", "ann@example.com")).await?;
//!     println!("Created user #{}", created.id);
//!
//!     let page = client.list_users(&ListQuery::first_page(100)).await?;
//!     println!("Found {} users", page.total());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod envelope;
mod error;
mod types;
mod users;

pub use client::UsersClient;
pub use envelope::{Envelope, Payload, Wrapped};
pub use error::{ClientError, Result};
pub use types::{
    format_timestamp, ClientConfig, DeleteMode, ListQuery, NewUser, PageMetadata, User, UserPage,
    UserUpdate, MAX_PER_PAGE,
};
