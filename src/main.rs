mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use signal_hub::config::HubConfig;
use signal_hub::external::Source;
use signal_hub::server;

#[derive(Parser)]
#[command(name = "signal-hub", version, about = "External signals hub for a memoir timeline")]
struct Cli {
    /// Config file (defaults to ~/.signal-hub/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Ingest one payload file (github, instagram, x, calendar, photos)
    Ingest {
        source: Source,
        file: PathBuf,
    },
    /// Show per-source connection state
    Status,
    /// Print the timeline as JSON
    Export,
    /// Check the timeline database
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HubConfig::load_from(path)?,
        None => HubConfig::load()?,
    };

    // Log to stderr so stdout stays clean for `export`.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => server::serve(config).await?,
        Command::Ingest { source, file } => cli::ingest::ingest(&config, source, &file).await?,
        Command::Status => cli::status::status(&config).await?,
        Command::Export => cli::export::export(&config).await?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
