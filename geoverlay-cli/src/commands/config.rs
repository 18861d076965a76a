//! Configuration inspection commands.
//!
//! Provides `config show` and `config path` for viewing the effective
//! configuration from the command line.

use std::path::Path;

use clap::Subcommand;

use geoverlay::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (file values merged over defaults)
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: &Path, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_show(config: &ConfigFile) -> Result<(), CliError> {
    println!("[basemap]");
    println!("url = {}", config.basemap.url);
    println!();
    println!("[overlay]");
    println!("name = {}", config.overlay.name);
    println!("mode = {}", config.overlay.mode);
    println!("vector_url = {}", config.overlay.vector_url);
    println!("archive_url = {}", config.overlay.archive_url);
    println!("tile_url = {}", config.overlay.tile_url);
    println!("tile_size = {}", config.overlay.tile_size);
    println!("activation = {}", config.overlay.activation);
    println!();
    println!("[view]");
    println!("center_lon = {}", config.view.center_lon);
    println!("center_lat = {}", config.view.center_lat);
    println!("zoom = {}", config.view.zoom);
    println!();
    println!("[logging]");
    println!("level = {}", config.logging.level);
    Ok(())
}
