//! locdb: turn map-share links into location notes in a vault.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locdb_cartes::CartesBackend;
use locdb_core::Clipboard;
use locdb_cli::logging::{self, LogConfig};
use locdb_cli::{drain_markers, App, CommandClipboard, EmptyClipboard, Host, StderrNotifier, StdinPrompt};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "locdb")]
#[command(author, version, about = "Location database for a markdown vault")]
#[command(propagate_version = true)]
struct Cli {
    /// Vault directory
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: the plugin data file inside the vault)
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new location entry from a maps URL
    New {
        /// Maps URL to use instead of the clipboard
        #[arg(long)]
        url: Option<String>,

        /// Skip the clipboard and prompt for the URL
        #[arg(long, conflicts_with = "url")]
        no_clipboard: bool,
    },

    /// Update location entries missing a map or embed
    Repair,

    /// Show or change plugin settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings as JSON
    Show,

    /// Set the folder where location entries are saved
    SetFolder {
        /// Vault-relative folder, e.g. /locations
        folder: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = LogConfig::from_env();
    let _log_guard = logging::init(&log_config);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = ?e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the command; `Ok(false)` means the flow aborted after notifying.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let app = App::open(&cli.vault, cli.settings)
        .await
        .with_context(|| format!("opening vault {}", cli.vault.display()))?;

    match cli.command {
        Commands::New { url, no_clipboard } => {
            let clipboard: Arc<dyn Clipboard> = if no_clipboard {
                Arc::new(EmptyClipboard)
            } else {
                Arc::new(CommandClipboard::system())
            };
            let creator = app.creator(host(clipboard)?);
            let outcome = app.new_entry(&creator, url.as_deref()).await;
            drain_markers(&creator).await;
            Ok(outcome?.is_success())
        }
        Commands::Repair => {
            let creator = app.creator(host(Arc::new(EmptyClipboard))?);
            let report = app.repair(&creator).await;
            drain_markers(&creator).await;
            let report = report?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.is_clean())
        }
        Commands::Settings { action } => {
            let settings = match action {
                SettingsAction::Show => app.settings().await?,
                SettingsAction::SetFolder { folder } => app.set_entry_folder(&folder).await?,
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(true)
        }
    }
}

fn host(clipboard: Arc<dyn Clipboard>) -> anyhow::Result<Host> {
    let provisioner = CartesBackend::from_env().context("configuring cartes.io client")?;
    info!(base_url = %provisioner.config().base_url, "Mapping service configured");
    Ok(Host {
        notifier: Arc::new(StderrNotifier),
        provisioner: Arc::new(provisioner),
        prompt: Arc::new(StdinPrompt::stdin()),
        clipboard,
    })
}
