//! GameBox command-line client.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gamebox_protocol::{GameId, LibraryStatus};
use tracing_subscriber::EnvFilter;

use commands::WriteAction;
use config::CliConfig;

/// Manage your GameBox game library from the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/gamebox/cli.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session cookie
    Login { email: String, password: String },

    /// End the current session
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// List the games in your library
    List,

    /// Browse the game catalog
    Catalog {
        /// Only games whose name contains this text
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Add a game to your library
    Add {
        game_id: String,

        /// Initial status: "na fila", "jogando", "completado", "abandonado"
        /// (or queued/playing/completed/abandoned)
        #[arg(long, default_value = "na fila")]
        status: LibraryStatus,
    },

    /// Remove a game from your library
    Remove { game_id: String },

    /// Change the status of a game (adds it if missing)
    Status {
        game_id: String,
        status: LibraryStatus,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let mut config = CliConfig::load_or_create(&config_path)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    match cli.command {
        Command::Login { email, password } => {
            commands::login(config, &config_path, email, password).await
        }
        Command::Logout => commands::logout(config, &config_path).await,
        Command::Whoami => commands::whoami(&config).await,
        Command::List => commands::list(&config).await,
        Command::Catalog { search } => commands::catalog(&config, search).await,
        Command::Add { game_id, status } => {
            commands::write(&config, GameId::from(game_id), WriteAction::Add(status)).await
        }
        Command::Remove { game_id } => {
            commands::write(&config, GameId::from(game_id), WriteAction::Remove).await
        }
        Command::Status { game_id, status } => {
            let action = WriteAction::ChangeStatus(status);
            commands::write(&config, GameId::from(game_id), action).await
        }
    }
}
