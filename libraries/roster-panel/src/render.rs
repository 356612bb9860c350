//! Rendering of panel state into [`Element`] trees.
//!
//! Every function here is pure: it reads state and builds nodes, nothing
//! else. Element ids match the admin page markup so a served page can be
//! swapped in region by region.

use crate::action::Action;
use crate::message::MessageBoard;
use crate::state::{count_label, CreateForm, DetailState, ListState};
use crate::view::{Element, Node};
use roster_client::{format_timestamp, User};

pub const TABLE_BODY_ID: &str = "usersTableBody";
pub const TABLE_WRAPPER_ID: &str = "usersTableWrapper";
pub const EMPTY_STATE_ID: &str = "emptyState";
pub const SPINNER_ID: &str = "loadingSpinner";
pub const META_ID: &str = "usersMeta";
pub const ALERTS_ID: &str = "alertPlaceholder";
pub const DETAIL_ID: &str = "userModal";
pub const DETAIL_CONTENT_ID: &str = "userDetailsContent";
pub const FORM_ID: &str = "addUserForm";

pub const NOT_FOUND_TEXT: &str = "User not found";

/// Table body with one row per user.
pub fn user_rows(users: &[User]) -> Element {
    Element::new("tbody")
        .id(TABLE_BODY_ID)
        .children(users.iter().map(|u| Node::from(user_row(u))))
}

fn user_row(user: &User) -> Element {
    Element::new("tr")
        .attr("data-user-id", user.id.to_string())
        .child(Element::new("td").text(user.id.to_string()))
        .child(Element::new("td").class("user-name").text(user.name.as_str()))
        .child(Element::new("td").class("user-email").text(user.email.as_str()))
        .child(
            Element::new("td")
                .class("text-end")
                .child(
                    Element::new("button")
                        .attr("type", "button")
                        .class("btn btn-outline-primary btn-sm me-1")
                        .action(Action::View(user.id))
                        .text("View"),
                )
                .child(
                    Element::new("button")
                        .attr("type", "button")
                        .class("btn btn-outline-danger btn-sm")
                        .action(Action::Delete(user.id))
                        .text("Delete"),
                ),
        )
}

/// Count indicator, spinner, table and empty-state block.
pub fn list_section(list: &ListState) -> Element {
    let meta = list.total.map(count_label).unwrap_or_default();

    Element::new("section")
        .id("usersSection")
        .child(
            Element::new("div")
                .class("d-flex justify-content-between")
                .child(Element::new("h2").text("Users"))
                .child(Element::new("span").id(META_ID).class("text-muted").text(meta))
                .child(
                    Element::new("button")
                        .attr("type", "button")
                        .class("btn btn-link btn-sm")
                        .action(Action::Reload)
                        .text("Refresh"),
                ),
        )
        .child(
            Element::new("div")
                .id(SPINNER_ID)
                .class("spinner-border")
                .attr("role", "status")
                .hidden_if(!list.is_loading()),
        )
        .child(
            Element::new("div")
                .id(TABLE_WRAPPER_ID)
                .hidden_if(!list.loaded)
                .child(
                    Element::new("table")
                        .class("table table-hover")
                        .child(
                            Element::new("thead").child(
                                Element::new("tr")
                                    .child(Element::new("th").text("ID"))
                                    .child(Element::new("th").text("Name"))
                                    .child(Element::new("th").text("Email"))
                                    .child(Element::new("th")),
                            ),
                        )
                        .child(user_rows(&list.users)),
                ),
        )
        .child(
            Element::new("div")
                .id(EMPTY_STATE_ID)
                .class("text-center text-muted py-4 small")
                .hidden_if(!list.is_empty())
                .text("No users found."),
        )
}

/// Detail surface; hidden while closed.
pub fn detail_section(detail: &DetailState) -> Element {
    let content: Vec<Node> = match detail {
        DetailState::Closed => Vec::new(),
        DetailState::Loading { .. } => vec![Element::new("div")
            .class("text-center py-3")
            .child(
                Element::new("div")
                    .class("spinner-border spinner-border-sm text-secondary")
                    .attr("role", "status"),
            )
            .into()],
        DetailState::Loaded(user) => detail_rows(user),
        DetailState::NotFound { .. } => vec![Element::new("div")
            .class("alert alert-warning mb-0")
            .text(NOT_FOUND_TEXT)
            .into()],
        DetailState::Failed { message, .. } => vec![Element::new("div")
            .class("alert alert-danger mb-0")
            .text(message.as_str())
            .into()],
    };

    Element::new("div")
        .id(DETAIL_ID)
        .class("modal")
        .attr("role", "dialog")
        .hidden_if(!detail.is_open())
        .child(Element::new("div").id(DETAIL_CONTENT_ID).children(content))
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("btn btn-secondary")
                .action(Action::CloseDetail)
                .text("Close"),
        )
}

fn detail_rows(user: &User) -> Vec<Node> {
    let active = match user.is_active {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    };

    vec![
        detail_row("ID", Element::new("span").text(user.id.to_string())),
        detail_row("Name", Element::new("span").text(user.name.as_str())),
        detail_row(
            "Email",
            Element::new("a")
                .attr("href", format!("mailto:{}", user.email))
                .class("link-body-emphasis")
                .text(user.email.as_str()),
        ),
        detail_row(
            "Created",
            Element::new("span").text(format_timestamp(user.created_at.as_deref())),
        ),
        detail_row(
            "Updated",
            Element::new("span").text(format_timestamp(user.updated_at.as_deref())),
        ),
        detail_row("Active", Element::new("span").text(active)),
    ]
}

fn detail_row(label: &str, value: Element) -> Node {
    Element::new("div")
        .class("user-detail-row")
        .child(Element::new("div").class("user-detail-label").text(label))
        .child(Element::new("div").class("user-detail-value").child(value))
        .into()
}

/// Alert placeholder holding every message still on screen.
pub fn message_section(board: &MessageBoard) -> Element {
    Element::new("div").id(ALERTS_ID).children(board.visible().map(|m| {
        let alert = Element::new("div")
            .class("alert")
            .class(&format!("alert-{}", m.severity))
            .attr("role", "alert")
            .child(Element::new("span").text(m.text.as_str()))
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .class("btn-close")
                    .attr("aria-label", "Close")
                    .action(Action::Dismiss(m.id)),
            );
        Node::from(alert)
    }))
}

/// Create form; the submit button is disabled while a create is in flight.
pub fn form_section(form: &CreateForm) -> Element {
    let mut submit = Element::new("button")
        .attr("type", "submit")
        .class("btn btn-primary")
        .action(Action::Submit);
    if form.is_submitting() {
        submit = submit.attr("disabled", "disabled");
    }

    Element::new("form")
        .id(FORM_ID)
        .child(
            Element::new("input")
                .id("nameInput")
                .attr("type", "text")
                .attr("placeholder", "Name")
                .attr("value", form.name.as_str()),
        )
        .child(
            Element::new("input")
                .id("emailInput")
                .attr("type", "email")
                .attr("placeholder", "Email")
                .attr("value", form.email.as_str()),
        )
        .child(submit.text(form.submit_label()))
}
