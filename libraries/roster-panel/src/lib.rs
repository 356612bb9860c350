//! Roster Panel
//!
//! State and rendering for the users admin panel. A [`ClientSync`] owns the
//! cached user list, the detail surface, the create form and the message
//! board, and keeps them consistent with a [`UserBackend`].
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, UsersClient};
//! use roster_panel::{ClientSync, PanelConfig};
//!
//! let client = UsersClient::new(ClientConfig::new("http://127.0.0.1:5000"))?;
//! let mut panel = ClientSync::new(client, PanelConfig::default());
//!
//! panel.load_users().await;
//! panel.create_user("Ann", "ann@example.com").await;
//! println!("{}", panel.render().to_html());
//! ```

mod action;
mod backend;
mod message;
pub mod render;
mod state;
mod sync;
mod view;

pub use action::{Action, ActionParseError};
pub use backend::UserBackend;
pub use message::{MessageBoard, MessageId, Severity, UiMessage, DEFAULT_MESSAGE_TTL};
pub use state::{
    count_label, CreateForm, DetailState, ListState, Phase, SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};
pub use sync::{
    ClientSync, Confirm, DetailTicket, LoadTicket, PanelConfig, CREATED, CREATE_FAILED, DELETED,
    DELETE_FAILED, DETAIL_FAILED, FIELDS_REQUIRED, LOAD_FAILED,
};
pub use view::{escape_html, Element, Node};
