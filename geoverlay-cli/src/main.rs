//! GeoOverlay CLI - Command-line interface
//!
//! This binary provides command-line access to the GeoOverlay library:
//! one-shot overlay fetches scoped to a bounding box, and configuration
//! inspection.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "geoverlay")]
#[command(about = "Fetch and inspect viewport-scoped overlay data", long_about = None)]
#[command(version = geoverlay::VERSION)]
struct Cli {
    /// Path to the INI configuration file
    #[arg(long, global = true, default_value = "geoverlay.ini")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch overlay data for a bounding box and print the resulting layers
    Fetch(commands::fetch::FetchArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = commands::load_config(&cli.config)?;

    let _logging_guard = geoverlay::logging::init_logging(
        geoverlay::logging::default_log_dir(),
        geoverlay::logging::default_log_file(),
        &config.logging.level,
    )
    .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args, &config).await,
        Commands::Config { command } => commands::config::run(command, &cli.config, &config),
    }
}
