//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taskpad_core::api::ApiClient;
use taskpad_core::config::{self, Config};
use taskpad_core::credentials::CredentialStore;
use taskpad_core::session::SessionManager;

mod commands;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(version)]
#[command(about = "Terminal client for a remote task service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the service base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new account on the service
    Register {
        /// Username for the new account
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and persist the session
    Login {
        /// Username to log in as
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and clear the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List tasks
    List,

    /// Add a task
    Add {
        /// Title of the new task
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Toggle a task's completion state
    Toggle {
        /// The id of the task to toggle
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Remove a task
    Rm {
        /// The id of the task to remove
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the service base URL in the config file
    SetUrl {
        /// The new base URL
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Builds the service client and session manager from config plus overrides.
fn service(base_url_override: Option<&str>, config: &Config) -> Result<(ApiClient, SessionManager)> {
    let base_url = match base_url_override {
        Some(url) => {
            config::validate_url(url)?;
            url.to_string()
        }
        None => config::resolve_base_url(config)?,
    };
    tracing::debug!(%base_url, "resolved service base URL");
    let client = ApiClient::new(base_url);
    let session = SessionManager::new(client.clone(), CredentialStore::new());
    Ok((client, session))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let Cli { command, base_url } = cli;
    let base_url = base_url.as_deref();

    match command {
        Commands::Register { username, password } => {
            let (client, _) = service(base_url, &config)?;
            commands::auth::register(&client, &username, password).await
        }
        Commands::Login { username, password } => {
            let (_, mut session) = service(base_url, &config)?;
            commands::auth::login(&mut session, &username, password).await
        }
        Commands::Logout => {
            let (_, mut session) = service(base_url, &config)?;
            commands::auth::logout(&mut session)
        }
        Commands::Whoami => {
            let (_, mut session) = service(base_url, &config)?;
            commands::auth::whoami(&mut session).await
        }
        Commands::List => {
            let (client, mut session) = service(base_url, &config)?;
            commands::tasks::list(&mut session, client).await
        }
        Commands::Add { title } => {
            let (client, mut session) = service(base_url, &config)?;
            commands::tasks::add(&mut session, client, &title).await
        }
        Commands::Toggle { id } => {
            let (client, mut session) = service(base_url, &config)?;
            commands::tasks::toggle(&mut session, client, id).await
        }
        Commands::Rm { id } => {
            let (client, mut session) = service(base_url, &config)?;
            commands::tasks::remove(&mut session, client, id).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
