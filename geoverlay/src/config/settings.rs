//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These are
//! pure data types; parsing lives in `file.rs`.

use std::fmt;
use std::str::FromStr;

/// Which fetch operation the toggle controller issues when the overlay is
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    /// Fetch GeoJSON vector features.
    Vector,
    /// Resolve a tiled raster source descriptor.
    RasterTiles,
    /// Fetch a zip archive of GeoTIFF rasters.
    RasterArchive,
}

impl FromStr for OverlayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector" => Ok(Self::Vector),
            "raster-tiles" => Ok(Self::RasterTiles),
            "raster-archive" => Ok(Self::RasterArchive),
            other => Err(format!(
                "unknown overlay mode '{}' (expected vector, raster-tiles, or raster-archive)",
                other
            )),
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector => write!(f, "vector"),
            Self::RasterTiles => write!(f, "raster-tiles"),
            Self::RasterArchive => write!(f, "raster-archive"),
        }
    }
}

/// How the overlay toggle starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationMode {
    /// Overlay stays off until the user toggles it.
    #[default]
    Manual,
    /// Overlay is enabled as soon as the engine starts.
    Auto,
}

impl FromStr for ActivationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown activation mode '{}' (expected manual or auto)",
                other
            )),
        }
    }
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Complete configuration loaded from the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub basemap: BasemapSettings,
    pub overlay: OverlaySettings,
    pub view: ViewSettings,
    pub logging: LoggingSettings,
}

/// Base map configuration.
#[derive(Debug, Clone)]
pub struct BasemapSettings {
    /// XYZ tile URL template for the base map.
    pub url: String,
}

impl Default for BasemapSettings {
    fn default() -> Self {
        Self {
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }
}

/// Overlay configuration.
#[derive(Debug, Clone)]
pub struct OverlaySettings {
    /// Logical overlay name; the registry key (or key prefix for archive
    /// layers).
    pub name: String,
    /// Which fetch operation a toggle-on triggers.
    pub mode: OverlayMode,
    /// Vector endpoint, `{bbox}` substituted with the query extent.
    pub vector_url: String,
    /// Raster archive endpoint, `{bbox}` substituted with the query extent.
    pub archive_url: String,
    /// XYZ tile URL template for raster-tile overlays.
    pub tile_url: String,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Whether the overlay starts enabled.
    pub activation: ActivationMode,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            name: "Overlay".to_string(),
            mode: OverlayMode::Vector,
            vector_url: "http://localhost:8080/nvda?bbox={bbox}".to_string(),
            archive_url: "http://localhost:8080/initialize-data?bbox={bbox}".to_string(),
            tile_url: "http://localhost:8080/tiles/{z}/{x}/{-y}.png".to_string(),
            tile_size: 256,
            activation: ActivationMode::Manual,
        }
    }
}

/// Initial view configuration.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: u8,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            center_lon: 0.0,
            center_lat: 0.0,
            zoom: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
