//! `replay-catalog` CLI - Browse broadcaster replay catalogs

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_list, cmd_path, cmd_providers, cmd_url, PathArgs};

#[derive(Parser)]
#[command(name = "replay-catalog")]
#[command(about = "Browse broadcaster replay catalogs and resolve stream URLs")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ~/.config/replay-catalog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog shows matching the given criteria or the configured watch list
    List {
        /// Provider to query
        #[arg(short, long, default_value = "francetv")]
        provider: String,

        /// Series name to look for
        #[arg(short, long)]
        show: Option<String>,

        /// Episode title to look for
        #[arg(short, long)]
        title: Option<String>,

        /// Word or phrase to look for in the synopsis
        #[arg(long)]
        pitch: Option<String>,

        /// Print one JSON object per show
        #[arg(long)]
        json: bool,
    },

    /// Resolve and print the stream URL of a show
    Url {
        /// Show identifier as listed by the provider
        id: String,

        /// Provider the show belongs to
        #[arg(short, long, default_value = "francetv")]
        provider: String,
    },

    /// Print the path a show would be saved to (no network access)
    Path {
        /// Provider naming the file
        #[arg(short, long, default_value = "francetv")]
        provider: String,

        /// Series name
        #[arg(short, long)]
        show: String,

        /// Episode title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Season label
        #[arg(long, default_value = "")]
        season: String,

        /// Episode label
        #[arg(short, long, default_value = "")]
        episode: String,

        /// Show identifier
        #[arg(long, default_value = "")]
        id: String,

        /// Air date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List available providers
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = cmd::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List {
            provider,
            show,
            title,
            pitch,
            json,
        } => {
            cmd_list(&config, &provider, show, title, pitch, json).await?;
        }
        Commands::Url { id, provider } => {
            cmd_url(&config, &provider, &id).await?;
        }
        Commands::Path {
            provider,
            show,
            title,
            season,
            episode,
            id,
            date,
        } => {
            let args = PathArgs {
                show,
                title,
                season,
                episode,
                id,
                date,
            };
            cmd_path(&config, &provider, args)?;
        }
        Commands::Providers => {
            cmd_providers(&config)?;
        }
    }

    Ok(())
}
