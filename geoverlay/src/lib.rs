//! GeoOverlay - viewport-synchronized overlay engine for map viewers
//!
//! This library keeps remote-sensing overlays (GeoJSON vectors, tiled
//! rasters, or GeoTIFF archives) in sync with a map viewport. It reacts
//! to view movement and a show/hide toggle, fetches data scoped to the
//! visible extent, and reconciles the layers attached to a rendering
//! surface.
//!
//! # High-Level API
//!
//! Wire the pieces together around a [`layer::RenderSurface`]
//! implementation for your mapping engine:
//!
//! ```ignore
//! use geoverlay::controller::{ControllerConfig, ToggleController};
//! use geoverlay::registry::OverlayRegistry;
//! use geoverlay::viewport::ViewportWatcher;
//!
//! let (watcher, extent_rx) = ViewportWatcher::new(surface.clone());
//! let watcher_task = watcher.start(cancel.clone());
//!
//! let registry = OverlayRegistry::new(surface);
//! let (handle, controller_task) =
//!     ToggleController::spawn(fetcher, registry, config, extent_rx, cancel);
//!
//! handle.set_enabled(true);
//! ```

pub mod archive;
pub mod config;
pub mod controller;
pub mod extent;
pub mod fetcher;
pub mod geojson_util;
pub mod layer;
pub mod logging;
pub mod registry;
pub mod viewport;

/// Version of the GeoOverlay library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
