//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration inspection (show, path)
//! - [`fetch`] - One-shot overlay fetch for a bounding box

pub mod config;
pub mod fetch;

use std::path::Path;

use geoverlay::config::{load_from_file, ConfigFile};

use crate::error::CliError;

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<ConfigFile, CliError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    load_from_file(path).map_err(|e| CliError::Config(e.to_string()))
}
