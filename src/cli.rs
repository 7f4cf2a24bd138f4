use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::{self, QUICK_ACTIONS};
use crate::config::Config;
use crate::ipc::{
    ActionDispatcher, Connection, ConnectionManager, DispatchOutcome, OutboundMessage,
    StatusUpdate, encode, fetch_status,
};

/// Hybrid Desk - desktop launcher with live machine status
#[derive(Parser, Debug)]
#[command(name = "hdesk")]
#[command(version)]
#[command(about = "Desktop launcher showing battery and network status")]
#[command(long_about = "Hybrid Desk (hdesk) talks to the desktop backend over a local socket.

It shows live battery and Wi-Fi status, refreshed every poll interval, and launches
applications from a quick-action list. Without a subcommand it opens the launcher.

Quick start:
  1. Start the desktop backend (it listens on /tmp/desktop-menu.sock)
  2. Run 'hdesk' and pick an application with the arrow keys and Enter
  3. Run 'hdesk --init' to write a .hdesk.toml you can customize")]
pub struct Cli {
    /// Path to config file (defaults to .hdesk.toml)
    #[arg(short, long, default_value = ".hdesk.toml")]
    pub config: String,

    /// Backend socket path (overrides config file setting)
    #[arg(short, long)]
    pub socket: Option<PathBuf>,

    /// Write a default .hdesk.toml config file
    #[arg(long)]
    pub init: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// One-shot commands that run without opening the launcher
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Query the backend once and print the status line
    Status,
    /// Ask the backend to launch an application
    Launch {
        /// Application id (see 'hdesk apps')
        app_id: String,
    },
    /// List the quick-action catalog
    Apps,
}

/// Load the config file (if any) and apply command line overrides
pub fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(socket) = &cli.socket {
        config.socket_path = socket.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Write a default config file unless one already exists
pub fn init_config(config_path: &str) -> anyhow::Result<()> {
    if Path::new(config_path).exists() {
        println!("Config file '{}' already exists.", config_path);
        return Ok(());
    }

    Config::default()
        .save(config_path)
        .with_context(|| format!("Failed to write config to '{}'", config_path))?;

    // Append commented-out log file option
    use std::fs::OpenOptions;
    let mut file = OpenOptions::new()
        .append(true)
        .open(config_path)
        .with_context(|| format!("Failed to append to '{}'", config_path))?;
    writeln!(file, "\n# Write logs to this file instead of the temp directory")?;
    writeln!(file, "# log_file = \"/tmp/hdesk.log\"")?;

    println!("Created {}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit {} to point socket_path at your backend", config_path);
    println!("  2. Run 'hdesk' to open the launcher");

    Ok(())
}

/// Run a one-shot command, writing its output to `out`
pub async fn run_command(
    command: &Commands,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Apps => {
            for action in QUICK_ACTIONS {
                writeln!(
                    out,
                    "{:<8} {} {:<18} {}",
                    action.id, action.icon, action.label, action.description
                )?;
            }
            Ok(())
        }
        Commands::Status => {
            let options = config.session_options();
            let mut manager = ConnectionManager::new(&options.endpoint);
            let connection = manager.connect().await?;
            send_hello(&connection, &options.client_id).await;

            let update = fetch_status(&connection, options.response_timeout).await;
            manager.close().await;

            match update {
                StatusUpdate::Snapshot(snapshot) => {
                    writeln!(out, "{}", snapshot.display_text())?;
                    Ok(())
                }
                StatusUpdate::Unavailable(reason) => Err(anyhow!(reason.message())),
            }
        }
        Commands::Launch { app_id } => {
            let action = catalog::find(app_id).ok_or_else(|| {
                let known: Vec<_> = QUICK_ACTIONS.iter().map(|a| a.id).collect();
                anyhow!("Unknown application '{}'. Known: {}", app_id, known.join(", "))
            })?;

            let options = config.session_options();
            let mut manager = ConnectionManager::new(&options.endpoint);
            let connection = manager.connect().await?;
            send_hello(&connection, &options.client_id).await;

            let dispatcher = ActionDispatcher::new(connection, options.client_id);
            let outcome = dispatcher.dispatch(Some(action.id)).await;
            manager.close().await;

            match outcome {
                DispatchOutcome::Sent => {
                    writeln!(out, "{} is launching...", action.label)?;
                    Ok(())
                }
                DispatchOutcome::Skipped | DispatchOutcome::Dropped => {
                    Err(anyhow!("Launch request for '{}' was not delivered", action.id))
                }
            }
        }
    }
}

async fn send_hello(connection: &Connection, client_id: &str) {
    let hello = encode(&OutboundMessage::hello(client_id));
    if let Err(err) = connection.send(&hello).await {
        tracing::warn!(error = %err, "hello was not delivered");
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
