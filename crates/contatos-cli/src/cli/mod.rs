//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use contatos_core::session::Session;
use contatos_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "contatos")]
#[command(version)]
#[command(about = "Terminal contact book backed by Firebase")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Also write logs to stderr (non-interactive commands only)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Credentials for non-interactive commands.
#[derive(clap::Args, Debug, Clone)]
struct Credentials {
    /// Account email
    #[arg(long, env = "CONTATOS_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "CONTATOS_PASSWORD", hide_env_values = true)]
    password: String,
}

impl Credentials {
    async fn sign_in(&self, config: &config::Config) -> Result<Session> {
        commands::auth::sign_in(config, &self.email, &self.password).await
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in once and report the result
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Manage contacts without the interactive UI
    Contacts {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ContactCommands {
    /// List every contact in the collection
    List {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Add a contact and print its id
    Add {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "PHONE")]
        phone: String,
    },
    /// Delete a contact by id
    Delete {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a commented config template
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, verbose } = cli;

    // default to the interactive app; the TUI owns the terminal, so it only logs to the file
    let Some(command) = command else {
        let config = prepare(false)?;
        return commands::tui::run(&config).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },

        Commands::Login { credentials } => {
            let config = prepare(verbose)?;
            commands::auth::login(&config, &credentials.email, &credentials.password).await
        }

        Commands::Contacts { command } => {
            let config = prepare(verbose)?;
            match command {
                ContactCommands::List { credentials } => {
                    let session = credentials.sign_in(&config).await?;
                    commands::contacts::list(&config, &session).await
                }
                ContactCommands::Add {
                    credentials,
                    name,
                    phone,
                } => {
                    let session = credentials.sign_in(&config).await?;
                    commands::contacts::add(&config, &session, &name, &phone).await
                }
                ContactCommands::Delete { credentials, id } => {
                    let session = credentials.sign_in(&config).await?;
                    commands::contacts::delete(&config, &session, &id).await
                }
            }
        }
    }
}

/// Loads config and installs logging for commands that talk to the backend.
fn prepare(stderr_logs: bool) -> Result<config::Config> {
    let config = config::Config::load().context("load config")?;
    logging::init(stderr_logs).context("init logging")?;
    Ok(config)
}
