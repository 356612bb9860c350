//! Panel state owned by [`ClientSync`](crate::ClientSync).

use roster_client::User;

/// Lifecycle of one asynchronous action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
}

/// What the detail surface is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: i64,
    },
    Loaded(User),
    NotFound {
        id: i64,
    },
    Failed {
        id: i64,
        message: String,
    },
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    /// Id of the user the surface was opened for.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { id }
            | DetailState::NotFound { id }
            | DetailState::Failed { id, .. } => Some(*id),
            DetailState::Loaded(user) => Some(user.id),
        }
    }
}

/// Resets the borrowed state to its default when dropped.
///
/// Held across an await so that a cancelled request still leaves the panel
/// idle instead of stuck in a busy state.
pub(crate) struct ResetOnDrop<'a, T: Default>(pub(crate) &'a mut T);

impl<T: Default> Drop for ResetOnDrop<'_, T> {
    fn drop(&mut self) {
        *self.0 = T::default();
    }
}

pub const SUBMIT_LABEL: &str = "Add user";
pub const SUBMIT_BUSY_LABEL: &str = "Saving...";

/// Inputs of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub email: String,
    pub phase: Phase,
}

impl CreateForm {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::InFlight
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}

/// Cached user list and its load status.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Last successfully loaded users, in server order
    pub users: Vec<User>,
    /// Count shown next to the table; `None` before the first load
    pub total: Option<u64>,
    pub phase: Phase,
    /// Whether at least one load has succeeded
    pub loaded: bool,
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::InFlight
    }

    pub fn is_empty(&self) -> bool {
        self.loaded && self.users.is_empty()
    }
}

/// Human-readable count, e.g. "1 user" or "3 users".
pub fn count_label(total: u64) -> String {
    format!("{} user{}", total, if total == 1 { "" } else { "s" })
}
