/// Subcommand implementations
///
/// Each command drives a `ClientSync` the way the admin page would, then
/// prints the resulting state. Panel messages go to stderr; data goes to
/// `out`.
use crate::error::{CliError, Result};
use roster_client::{format_timestamp, DeleteMode, User, UserUpdate, UsersClient};
use roster_panel::{count_label, ClientSync, Confirm, DetailState, Node, Severity, UserBackend};
use std::io::{self, BufRead, Write};

/// Confirmation prompt on the terminal.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Print pending panel messages and turn the first failure into an error.
pub fn report_messages<B: UserBackend>(panel: &mut ClientSync<B>) -> Result<()> {
    let mut failure = None;
    for message in panel.messages_mut().drain() {
        eprintln!("[{}] {}", message.severity, message.text);
        if failure.is_none() && matches!(message.severity, Severity::Danger | Severity::Warning) {
            failure = Some(message.text);
        }
    }

    match failure {
        Some(text) => Err(CliError::Action(text)),
        None => Ok(()),
    }
}

pub async fn list<B: UserBackend, W: Write>(
    panel: &mut ClientSync<B>,
    html: bool,
    out: &mut W,
) -> Result<()> {
    panel.load_users().await;
    report_messages(panel)?;

    if html {
        let body = Node::from(panel.render_list(panel.users()));
        writeln!(out, "{}", body.to_html())?;
        return Ok(());
    }

    for user in panel.users() {
        write_row(out, user)?;
    }
    let total = panel.list().total.unwrap_or_default();
    writeln!(out, "{}", count_label(total))?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, user: &User) -> Result<()> {
    writeln!(out, "{:>6}  {:<24}  {}", user.id, user.name, user.email)?;
    Ok(())
}

pub async fn show<B: UserBackend, W: Write>(
    panel: &mut ClientSync<B>,
    id: i64,
    out: &mut W,
) -> Result<()> {
    panel.view_detail(id).await;

    match panel.detail() {
        DetailState::Loaded(user) => write_detail(out, user),
        DetailState::NotFound { .. } => Err(CliError::NotFound(id)),
        DetailState::Failed { message, .. } => Err(CliError::Action(message.clone())),
        DetailState::Closed | DetailState::Loading { .. } => Ok(()),
    }
}

fn write_detail<W: Write>(out: &mut W, user: &User) -> Result<()> {
    let active = match user.is_active {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    };

    writeln!(out, "ID:       {}", user.id)?;
    writeln!(out, "Name:     {}", user.name)?;
    writeln!(out, "Email:    {}", user.email)?;
    writeln!(out, "Created:  {}", format_timestamp(user.created_at.as_deref()))?;
    writeln!(out, "Updated:  {}", format_timestamp(user.updated_at.as_deref()))?;
    writeln!(out, "Active:   {}", active)?;
    Ok(())
}

pub async fn create<B: UserBackend, W: Write>(
    panel: &mut ClientSync<B>,
    name: &str,
    email: &str,
    out: &mut W,
) -> Result<()> {
    let created = panel.create_user(name, email).await;
    report_messages(panel)?;

    if let Some(user) = created {
        writeln!(out, "Created user #{}", user.id)?;
        write_row(out, &user)?;
    }
    Ok(())
}

pub async fn update<W: Write>(
    client: &UsersClient,
    id: i64,
    name: Option<String>,
    email: Option<String>,
    out: &mut W,
) -> Result<()> {
    let update = UserUpdate {
        name: name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        email: email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
    };

    let user = client.update_user(id, &update).await.map_err(|e| {
        if e.is_not_found() {
            CliError::NotFound(id)
        } else {
            CliError::Client(e)
        }
    })?;

    writeln!(out, "Updated user #{}", user.id)?;
    write_row(out, &user)
}

/// Soft delete through the panel.
pub async fn delete<B: UserBackend, W: Write>(
    panel: &mut ClientSync<B>,
    id: i64,
    out: &mut W,
) -> Result<()> {
    let deleted = panel.delete_user(id).await;
    report_messages(panel)?;

    if deleted {
        writeln!(out, "Deactivated user #{}", id)?;
    }
    Ok(())
}

/// Permanent delete; bypasses the panel since it never hard-deletes.
pub async fn purge<W: Write>(
    client: &UsersClient,
    id: i64,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<()> {
    if !confirm.confirm(&format!("Permanently delete user #{}?", id)) {
        return Ok(());
    }

    client.delete_user(id, DeleteMode::Hard).await?;
    writeln!(out, "Deleted user #{}", id)?;
    Ok(())
}

/// Load the list and print the whole page as HTML.
pub async fn page<B: UserBackend, W: Write>(panel: &mut ClientSync<B>, out: &mut W) -> Result<()> {
    panel.load_users().await;
    writeln!(out, "{}", panel.render().to_html())?;
    Ok(())
}
