//! One-shot overlay fetch command.
//!
//! Performs the same fetch the toggle controller would issue for a given
//! viewport, then prints the resulting layers instead of attaching them.

use clap::Args;
use tracing::debug;

use geoverlay::archive;
use geoverlay::config::{ConfigFile, OverlayMode};
use geoverlay::extent::GeoExtent;
use geoverlay::fetcher::{AsyncReqwestClient, HttpOverlayFetcher, OverlayFetcher};

use crate::error::CliError;

/// Fetch arguments.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Bounding box as minLon,minLat,maxLon,maxLat
    #[arg(long)]
    bbox: String,

    /// Overlay mode: vector, raster-tiles, or raster-archive
    /// (defaults to the configured mode)
    #[arg(long)]
    mode: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

/// Run the fetch command.
pub async fn run(args: FetchArgs, config: &ConfigFile) -> Result<(), CliError> {
    let extent = parse_bbox(&args.bbox)?;
    let mode = match &args.mode {
        Some(raw) => raw.parse::<OverlayMode>().map_err(CliError::Config)?,
        None => config.overlay.mode,
    };

    debug!(%mode, extent = %extent.bbox_string(), "resolved fetch parameters");
    let client = AsyncReqwestClient::with_timeout(args.timeout)?;
    let fetcher = HttpOverlayFetcher::new(
        client,
        config.overlay.vector_url.clone(),
        config.overlay.archive_url.clone(),
        config.overlay.tile_url.clone(),
        config.overlay.tile_size,
    );

    println!(
        "Fetching {} overlay data for [{}]",
        mode,
        extent.bbox_string()
    );

    match mode {
        OverlayMode::Vector => {
            let collection = fetcher.fetch_vector(extent).await?;
            println!(
                "{}: {} features",
                config.overlay.name,
                collection.features.len()
            );
        }
        OverlayMode::RasterTiles => {
            let descriptor = fetcher.fetch_raster_source(extent).await?;
            println!(
                "{}: tiles from {} ({}px)",
                config.overlay.name, descriptor.url_template, descriptor.tile_size
            );
        }
        OverlayMode::RasterArchive => {
            let bytes = fetcher.fetch_raster_archive(extent).await?;
            let entries = archive::extract_rasters(&bytes)?;
            if entries.is_empty() {
                println!("{}: archive contained no raster entries", config.overlay.name);
            } else {
                for entry in entries {
                    println!(
                        "{}: {} ({} bytes)",
                        config.overlay.name,
                        entry.filename,
                        entry.data.len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn parse_bbox(raw: &str) -> Result<GeoExtent, CliError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(invalid_bbox(raw, "expected four comma-separated values"));
    }

    let mut coords = [0.0_f64; 4];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| invalid_bbox(raw, &format!("'{}' is not a number", part.trim())))?;
    }

    GeoExtent::new(coords[0], coords[1], coords[2], coords[3])
        .map_err(|e| invalid_bbox(raw, &e.to_string()))
}

fn invalid_bbox(value: &str, reason: &str) -> CliError {
    CliError::InvalidBbox {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
