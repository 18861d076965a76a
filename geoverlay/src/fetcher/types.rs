//! Fetcher trait and error types.

use std::future::Future;

use geojson::FeatureCollection;
use thiserror::Error;

use crate::extent::GeoExtent;
use crate::layer::RasterSourceDescriptor;

/// Errors that can occur while fetching overlay data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// Network or backend failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend responded, but the payload could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Fetches overlay data scoped to a geographic query extent.
///
/// The extent is always in geographic lon/lat degrees, ordered
/// (minLon, minLat, maxLon, maxLat). Implementations are expected to be
/// cheap to share behind an `Arc`; the controller spawns one task per
/// fetch and discards stale results by generation, so cancellation is
/// cooperative only.
pub trait OverlayFetcher: Send + Sync {
    /// Fetches vector features (GeoJSON, geographic CRS on the wire).
    fn fetch_vector(
        &self,
        extent: GeoExtent,
    ) -> impl Future<Output = Result<FeatureCollection, FetchError>> + Send;

    /// Fetches a compressed archive of raster files covering the extent.
    fn fetch_raster_archive(
        &self,
        extent: GeoExtent,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Resolves a tiled raster source descriptor for the extent.
    fn fetch_raster_source(
        &self,
        extent: GeoExtent,
    ) -> impl Future<Output = Result<RasterSourceDescriptor, FetchError>> + Send;
}
