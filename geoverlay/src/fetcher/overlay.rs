//! HTTP-backed overlay data fetcher.

use geojson::{FeatureCollection, GeoJson};
use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{FetchError, OverlayFetcher};
use crate::extent::GeoExtent;
use crate::layer::RasterSourceDescriptor;

/// Placeholder substituted with `minLon,minLat,maxLon,maxLat` in URL
/// templates.
const BBOX_PLACEHOLDER: &str = "{bbox}";

/// Fetches overlay data over HTTP from bbox-parameterized endpoints.
///
/// Vector and archive endpoints carry a `{bbox}` placeholder that is
/// replaced with the query extent. The raster tile source is a static XYZ
/// template resolved locally: the descriptor is bounded to the requested
/// extent but no request is made, matching hosts where the tile server
/// itself is extent-agnostic.
pub struct HttpOverlayFetcher<C: AsyncHttpClient> {
    client: C,
    vector_url: String,
    archive_url: String,
    tile_url: String,
    tile_size: u32,
}

impl<C: AsyncHttpClient> HttpOverlayFetcher<C> {
    pub fn new(
        client: C,
        vector_url: impl Into<String>,
        archive_url: impl Into<String>,
        tile_url: impl Into<String>,
        tile_size: u32,
    ) -> Self {
        Self {
            client,
            vector_url: vector_url.into(),
            archive_url: archive_url.into(),
            tile_url: tile_url.into(),
            tile_size,
        }
    }

    fn resolve_url(template: &str, extent: &GeoExtent) -> String {
        template.replace(BBOX_PLACEHOLDER, &extent.bbox_string())
    }
}

impl<C: AsyncHttpClient> OverlayFetcher for HttpOverlayFetcher<C> {
    async fn fetch_vector(&self, extent: GeoExtent) -> Result<FeatureCollection, FetchError> {
        let url = Self::resolve_url(&self.vector_url, &extent);
        debug!(%url, "fetching vector overlay data");
        let body = self.client.get(&url).await?;

        let text = std::str::from_utf8(&body)
            .map_err(|e| FetchError::InvalidResponse(format!("response is not UTF-8: {}", e)))?;
        let geojson: GeoJson = text
            .parse()
            .map_err(|e| FetchError::InvalidResponse(format!("invalid GeoJSON: {}", e)))?;
        FeatureCollection::try_from(geojson).map_err(|e| {
            FetchError::InvalidResponse(format!("expected a FeatureCollection: {}", e))
        })
    }

    async fn fetch_raster_archive(&self, extent: GeoExtent) -> Result<Vec<u8>, FetchError> {
        let url = Self::resolve_url(&self.archive_url, &extent);
        debug!(%url, "fetching raster archive");
        self.client.get(&url).await
    }

    async fn fetch_raster_source(
        &self,
        extent: GeoExtent,
    ) -> Result<RasterSourceDescriptor, FetchError> {
        Ok(RasterSourceDescriptor::bounded(
            self.tile_url.clone(),
            self.tile_size,
            &extent,
        ))
    }
}
