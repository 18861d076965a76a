//! Layer types and view events.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extent::GeoExtent;

/// Opaque handle into the rendering surface for an attached layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

impl fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// The renderable kind of an overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Vector features (GeoJSON).
    Vector,
    /// Tiled raster imagery described by a URL template.
    RasterTile,
    /// A single raster image (e.g. one GeoTIFF extracted from an archive).
    RasterImage,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector => write!(f, "vector"),
            Self::RasterTile => write!(f, "raster-tile"),
            Self::RasterImage => write!(f, "raster-image"),
        }
    }
}

/// Describes a tiled raster source for the rendering surface.
///
/// Mirrors the XYZ source configuration of the host map: a URL template
/// with `{z}/{x}/{y}` (or `{-y}`) placeholders, the tile edge length in
/// pixels, and an optional geographic extent limiting where tiles are
/// requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSourceDescriptor {
    /// Tile URL template, e.g. `http://localhost:8080/tiles/{z}/{x}/{-y}.png`.
    pub url_template: String,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Geographic extent the source covers, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<[f64; 4]>,
}

impl RasterSourceDescriptor {
    /// Creates a descriptor bounded to the given query extent.
    pub fn bounded(url_template: impl Into<String>, tile_size: u32, extent: &GeoExtent) -> Self {
        Self {
            url_template: url_template.into(),
            tile_size,
            extent: Some([
                extent.min_lon(),
                extent.min_lat(),
                extent.max_lon(),
                extent.max_lat(),
            ]),
        }
    }
}

/// Payload of an overlay layer, already in the form the rendering surface
/// consumes (vector geometries reprojected to the display CRS).
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSource {
    /// GeoJSON features, reprojected to the display CRS.
    Vector(FeatureCollection),
    /// A tiled raster source.
    RasterTile(RasterSourceDescriptor),
    /// Raw raster bytes plus the originating filename.
    RasterImage { filename: String, data: Vec<u8> },
}

/// A named, typed renderable unit owned by the overlay registry once
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    /// Unique registry key.
    pub name: String,
    pub kind: LayerKind,
    pub source: LayerSource,
}

impl OverlayLayer {
    /// Creates a vector layer from features already in the display CRS.
    pub fn vector(name: impl Into<String>, features: FeatureCollection) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Vector,
            source: LayerSource::Vector(features),
        }
    }

    /// Creates a tiled raster layer.
    pub fn raster_tile(name: impl Into<String>, descriptor: RasterSourceDescriptor) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::RasterTile,
            source: LayerSource::RasterTile(descriptor),
        }
    }

    /// Creates a single-image raster layer.
    pub fn raster_image(name: impl Into<String>, filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::RasterImage,
            source: LayerSource::RasterImage {
                filename: filename.into(),
                data,
            },
        }
    }
}

/// Map movement events emitted by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Center, resolution, or rotation changed (pan/zoom end).
    ViewChanged,
    /// An interaction (drag) is in progress.
    DragInProgress,
}
