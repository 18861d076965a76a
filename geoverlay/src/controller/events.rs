//! Controller events, states, and configuration.

use geojson::FeatureCollection;

use crate::config::{ActivationMode, OverlayMode};
use crate::extent::{Crs, GeoExtent};
use crate::fetcher::FetchError;
use crate::layer::RasterSourceDescriptor;

/// Events driving the toggle controller. One event is processed to
/// completion before the next; fetch completions re-enter as
/// [`ControllerEvent::FetchResolved`].
#[derive(Debug)]
pub enum ControllerEvent {
    /// User toggled the overlay on or off.
    Toggle(bool),
    /// The shared latest-extent slot changed.
    ExtentChanged(GeoExtent),
    /// An in-flight fetch completed. `generation` identifies the request;
    /// responses older than the latest issued generation are discarded.
    FetchResolved {
        generation: u64,
        outcome: Result<FetchPayload, FetchError>,
    },
}

/// Data produced by a successful fetch, before layer construction.
#[derive(Debug)]
pub enum FetchPayload {
    /// GeoJSON features in geographic CRS.
    Vector(FeatureCollection),
    /// Compressed archive of raster files.
    RasterArchive(Vec<u8>),
    /// Tiled raster source descriptor.
    RasterSource(RasterSourceDescriptor),
}

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Overlay off; extent changes are ignored.
    #[default]
    Disabled,
    /// A fetch is in flight (or awaited once an extent becomes available).
    Loading,
    /// Overlay layers are attached.
    Displayed,
    /// The last fetch or attach failed; reason retained for reporting.
    /// Retry happens on re-toggle or the next extent change.
    Error { reason: String },
}

/// Static controller configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Logical overlay name; registry key, or key prefix for archive
    /// layers (`"<name>: <entry-filename>"`).
    pub overlay_name: String,
    /// Which fetch operation toggle-on issues.
    pub mode: OverlayMode,
    /// CRS vector features are reprojected into before attach.
    pub display_crs: Crs,
    /// Whether the overlay starts enabled when the controller spawns.
    pub activation: ActivationMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            overlay_name: "Overlay".to_string(),
            mode: OverlayMode::Vector,
            display_crs: Crs::WebMercator,
            activation: ActivationMode::Manual,
        }
    }
}

impl ControllerConfig {
    /// Builds controller configuration from overlay settings.
    pub fn from_settings(settings: &crate::config::OverlaySettings, display_crs: Crs) -> Self {
        Self {
            overlay_name: settings.name.clone(),
            mode: settings.mode,
            display_crs,
            activation: settings.activation,
        }
    }
}
