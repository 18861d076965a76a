//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::process;

use thiserror::Error;

use geoverlay::archive::ArchiveError;
use geoverlay::fetcher::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed --bbox argument
    #[error("Invalid bounding box '{value}': {reason}")]
    InvalidBbox { value: String, reason: String },

    /// Overlay data fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Raster archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::InvalidBbox { .. } = self {
            eprintln!();
            eprintln!("Expected format: minLon,minLat,maxLon,maxLat (e.g. -1.5,50.0,1.5,52.0)");
        }

        process::exit(1)
    }
}
