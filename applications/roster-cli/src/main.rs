/// Roster - users admin client
use clap::{Parser, Subcommand};
use roster_cli::{commands, RosterConfig, StdinConfirm};
use roster_client::UsersClient;
use roster_panel::{ClientSync, Confirm};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage users through the Roster API", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Only users whose name or email contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Print the table body as HTML
        #[arg(long)]
        html: bool,
    },
    /// Show a single user
    Show { id: i64 },
    /// Create a new user
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
    /// Change a user's name or email
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Delete a user (soft delete unless --hard)
    Delete {
        id: i64,
        /// Remove the record permanently
        #[arg(long)]
        hard: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Render the whole admin page as HTML
    Page,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info,roster_client=warn,roster_panel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = RosterConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = UsersClient::new(config.client_config())?;
    tracing::debug!("Using users API at {}", client.collection_url());

    let mut panel = ClientSync::new(client, config.panel.clone()).with_confirm(StdinConfirm);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { page, search, html } => {
            panel.set_page(page);
            panel.set_search(search.as_deref());
            commands::list(&mut panel, html, &mut out).await?;
        }
        Commands::Show { id } => commands::show(&mut panel, id, &mut out).await?,
        Commands::Create { name, email } => {
            commands::create(&mut panel, &name, &email, &mut out).await?;
        }
        Commands::Update { id, name, email } => {
            commands::update(panel.backend(), id, name, email, &mut out).await?;
        }
        Commands::Delete { id, hard: true, yes } => {
            let mut always = |_: &str| true;
            let mut prompt = StdinConfirm;
            let confirm: &mut dyn Confirm = if yes { &mut always } else { &mut prompt };
            commands::purge(panel.backend(), id, confirm, &mut out).await?;
        }
        Commands::Delete { id, hard: false, yes } => {
            if yes {
                panel = panel.with_confirm(|_: &str| true);
            }
            commands::delete(&mut panel, id, &mut out).await?;
        }
        Commands::Page => commands::page(&mut panel, &mut out).await?,
    }

    Ok(())
}
