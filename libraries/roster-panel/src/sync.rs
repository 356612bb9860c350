//! Keeps the rendered user list in step with the backend.

use crate::action::{Action, ActionParseError};
use crate::backend::UserBackend;
use crate::message::{MessageBoard, Severity, DEFAULT_MESSAGE_TTL};
use crate::render;
use crate::state::{CreateForm, DetailState, ListState, Phase, ResetOnDrop};
use crate::view::{Element, Node};
use roster_client::{DeleteMode, ListQuery, NewUser, Result, User, UserPage};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const LOAD_FAILED: &str = "Failed to load users. Please try again.";
pub const DETAIL_FAILED: &str = "Failed to load user.";
pub const FIELDS_REQUIRED: &str = "Name and email are required.";
pub const CREATED: &str = "User created successfully.";
pub const CREATE_FAILED: &str = "Failed to create user.";
pub const DELETED: &str = "User deleted.";
pub const DELETE_FAILED: &str = "Failed to delete user.";

/// Panel behaviour settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Users requested per load
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_message_ttl_secs")]
    pub message_ttl_secs: u64,

    /// Ask before deleting
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

impl PanelConfig {
    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            message_ttl_secs: default_message_ttl_secs(),
            confirm_deletes: default_confirm_deletes(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

fn default_message_ttl_secs() -> u64 {
    DEFAULT_MESSAGE_TTL.as_secs()
}

fn default_confirm_deletes() -> bool {
    true
}

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool + Send,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Identifies one list load; only the newest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Identifies one detail fetch; closing or reopening the surface
/// supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DetailTicket(u64);

/// Application state for the users panel plus the actions that mutate it.
///
/// One instance per page: create it on init, drop it on navigation. All
/// mutations go through the backend and are followed by a full reload of
/// the list rather than a local patch.
pub struct ClientSync<B> {
    backend: B,
    config: PanelConfig,
    list: ListState,
    detail: DetailState,
    form: CreateForm,
    messages: MessageBoard,
    confirm: Box<dyn Confirm>,
    newest_ticket: u64,
    newest_detail: u64,
    page: u32,
    search: Option<String>,
}

impl<B: UserBackend> ClientSync<B> {
    pub fn new(backend: B, config: PanelConfig) -> Self {
        let messages = MessageBoard::new(config.message_ttl());
        Self {
            backend,
            config,
            list: ListState::default(),
            detail: DetailState::default(),
            form: CreateForm::default(),
            messages,
            confirm: Box::new(|_: &str| true),
            newest_ticket: 0,
            newest_detail: 0,
            page: 1,
            search: None,
        }
    }

    /// Replace the confirmation hook used before deletes.
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Cached users from the last successful load.
    pub fn users(&self) -> &[User] {
        &self.list.users
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    /// Mutable access for input bindings.
    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    pub fn messages(&self) -> &MessageBoard {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageBoard {
        &mut self.messages
    }

    /// Page requested by the next load; pages start at 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Filter the next load by name or email. Blank input clears the filter.
    pub fn set_search(&mut self, search: Option<&str>) {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Fetch the current page of users and re-render the list.
    ///
    /// Failures leave the previous list in place and surface as a danger
    /// message; nothing is returned to the caller.
    pub async fn load_users(&mut self) {
        let (ticket, query) = self.begin_load();
        let result = {
            let _idle = ResetOnDrop(&mut self.list.phase);
            self.backend.list_users(&query).await
        };
        self.finish_load(ticket, result);
    }

    /// Start a load: mark the list busy and hand out a fresh ticket.
    ///
    /// Drivers that run fetches concurrently call this, perform the request
    /// themselves, then pass the outcome to [`finish_load`](Self::finish_load).
    pub fn begin_load(&mut self) -> (LoadTicket, ListQuery) {
        self.newest_ticket += 1;
        self.list.phase = Phase::InFlight;
        let query = ListQuery {
            page: self.page,
            per_page: self.config.page_size,
            search: self.search.clone(),
        };
        debug!(
            ticket = self.newest_ticket,
            page = query.page,
            per_page = query.per_page,
            "Loading users"
        );
        (LoadTicket(self.newest_ticket), query)
    }

    /// Apply a load result. Returns false when the ticket was superseded by
    /// a later [`begin_load`](Self::begin_load) and the result was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<UserPage>) -> bool {
        if ticket.0 != self.newest_ticket {
            debug!(ticket = ticket.0, newest = self.newest_ticket, "Discarding stale user list");
            return false;
        }

        self.list.phase = Phase::Idle;
        match result {
            Ok(page) => {
                let total = page.total();
                self.list.users = page.users;
                self.list.total = Some(total);
                self.list.loaded = true;
                debug!(users = self.list.users.len(), total, "User list updated");
            }
            Err(e) => {
                error!(error = %e, "Failed to load users");
                self.messages.push(Severity::Danger, LOAD_FAILED);
            }
        }
        true
    }

    /// Build table rows for `list`. Pure; never fetches.
    pub fn render_list(&self, list: &[User]) -> Element {
        render::user_rows(list)
    }

    // =========================================================================
    // Detail
    // =========================================================================

    /// Open the detail surface for `id` and fill it once the user arrives.
    ///
    /// Errors are shown inside the surface, never as global messages. If
    /// the call is cancelled mid-request the surface closes.
    pub async fn view_detail(&mut self, id: i64) {
        let ticket = self.begin_detail(id);
        let result = {
            let _closed = ResetOnDrop(&mut self.detail);
            self.backend.get_user(id).await
        };
        self.finish_detail(ticket, id, result);
    }

    /// Show the loading indicator for `id` and hand out a ticket for the
    /// fetch.
    pub fn begin_detail(&mut self, id: i64) -> DetailTicket {
        self.newest_detail += 1;
        self.detail = DetailState::Loading { id };
        DetailTicket(self.newest_detail)
    }

    /// Apply a detail fetch. Returns false when the surface was closed or
    /// reopened since [`begin_detail`](Self::begin_detail).
    pub fn finish_detail(&mut self, ticket: DetailTicket, id: i64, result: Result<User>) -> bool {
        if ticket.0 != self.newest_detail {
            debug!(user_id = id, "Discarding stale user detail");
            return false;
        }

        self.detail = match result {
            Ok(user) => DetailState::Loaded(user),
            Err(e) if e.is_not_found() => {
                warn!(user_id = id, "User not found");
                DetailState::NotFound { id }
            }
            Err(e) => {
                error!(user_id = id, error = %e, "Failed to load user");
                DetailState::Failed {
                    id,
                    message: DETAIL_FAILED.to_string(),
                }
            }
        };
        true
    }

    pub fn close_detail(&mut self) {
        self.newest_detail += 1;
        self.detail = DetailState::Closed;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a user from raw form input.
    ///
    /// Returns the created user, or `None` when validation or the request
    /// failed (a message explains which). The submit control is re-enabled
    /// on every outcome, cancellation included.
    pub async fn create_user(&mut self, name: &str, email: &str) -> Option<User> {
        let request = self.begin_create(name, email)?;
        let result = {
            let _idle = ResetOnDrop(&mut self.form.phase);
            self.backend.create_user(&request).await
        };
        self.finish_create(result).await
    }

    /// Validate the inputs and mark the form busy.
    ///
    /// Returns the request to send, or `None` if a field is blank (a warning
    /// is shown) or a submit is already in flight.
    pub fn begin_create(&mut self, name: &str, email: &str) -> Option<NewUser> {
        if self.form.is_submitting() {
            debug!("Create already in flight");
            return None;
        }

        self.form.name = name.to_string();
        self.form.email = email.to_string();

        let request = NewUser::trimmed(name, email);
        if request.name.is_empty() || request.email.is_empty() {
            self.messages.push(Severity::Warning, FIELDS_REQUIRED);
            return None;
        }

        self.form.phase = Phase::InFlight;
        Some(request)
    }

    /// Re-enable the form and apply the create outcome; a success reloads
    /// the list once.
    pub async fn finish_create(&mut self, result: Result<User>) -> Option<User> {
        self.form.phase = Phase::Idle;

        match result {
            Ok(user) => {
                info!(user_id = user.id, email = %user.email, "User created");
                self.messages.push(Severity::Success, CREATED);
                self.form.clear();
                self.load_users().await;
                Some(user)
            }
            Err(e) => {
                error!(error = %e, "Failed to create user");
                let text = e.server_text().unwrap_or_else(|| CREATE_FAILED.to_string());
                self.messages.push(Severity::Danger, text);
                None
            }
        }
    }

    /// Submit the create form with its current inputs.
    pub async fn submit_form(&mut self) -> Option<User> {
        let name = self.form.name.clone();
        let email = self.form.email.clone();
        self.create_user(&name, &email).await
    }

    /// Soft-delete a user after confirmation. Returns true if it was deleted.
    pub async fn delete_user(&mut self, id: i64) -> bool {
        if self.config.confirm_deletes
            && !self.confirm.confirm(&format!("Delete user #{}?", id))
        {
            debug!(user_id = id, "Delete cancelled");
            return false;
        }

        match self.backend.delete_user(id, DeleteMode::Soft).await {
            Ok(()) => {
                info!(user_id = id, "User deleted");
                if self.detail.user_id() == Some(id) {
                    self.detail = DetailState::Closed;
                }
                self.messages.push(Severity::Success, DELETED);
                self.load_users().await;
                true
            }
            Err(e) => {
                error!(user_id = id, error = %e, "Failed to delete user");
                self.messages.push(Severity::Danger, DELETE_FAILED);
                false
            }
        }
    }

    // =========================================================================
    // Events & rendering
    // =========================================================================

    /// Run the handler bound to `action`.
    pub async fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "Dispatching action");
        match action {
            Action::Reload => self.load_users().await,
            Action::View(id) => self.view_detail(id).await,
            Action::Delete(id) => {
                self.delete_user(id).await;
            }
            Action::CloseDetail => self.close_detail(),
            Action::Submit => {
                self.submit_form().await;
            }
            Action::Dismiss(id) => {
                self.messages.dismiss(id);
            }
        }
    }

    /// Dispatch the action bound to a rendered element.
    pub async fn click(&mut self, el: &Element) -> std::result::Result<(), ActionParseError> {
        let action = Action::from_element(el)?;
        self.dispatch(action).await;
        Ok(())
    }

    /// Render the whole panel. Expired messages are pruned first.
    pub fn render(&mut self) -> Node {
        self.messages.prune();

        Element::new("div")
            .id("app")
            .class("container")
            .child(render::message_section(&self.messages))
            .child(render::form_section(&self.form))
            .child(render::list_section(&self.list))
            .child(render::detail_section(&self.detail))
            .into()
    }
}
