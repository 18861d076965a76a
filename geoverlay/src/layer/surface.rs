//! Rendering-surface trait.

use thiserror::Error;
use tokio::sync::broadcast;

use super::types::{LayerHandle, OverlayLayer, ViewEvent};
use crate::extent::Extent;

/// Errors reported by the rendering surface.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    /// The surface refused to construct a renderable from the layer.
    #[error("failed to add layer '{name}': {reason}")]
    AddFailed { name: String, reason: String },

    /// The handle does not refer to an attached layer.
    #[error("unknown layer handle {0}")]
    UnknownHandle(u64),
}

/// Seam between the synchronization engine and the external mapping engine.
///
/// All methods are synchronous and must not call back into the engine;
/// attach/detach during a controller transition relies on that (no
/// reentrancy).
pub trait RenderSurface: Send + Sync {
    /// Constructs a renderable from the layer and adds it to the map.
    fn add_layer(&self, layer: &OverlayLayer) -> Result<LayerHandle, SurfaceError>;

    /// Removes a previously added layer.
    fn remove_layer(&self, handle: LayerHandle) -> Result<(), SurfaceError>;

    /// The current viewport extent in the display CRS.
    fn display_extent(&self) -> Extent;

    /// Subscribes to view-changed and drag events.
    fn subscribe_view_events(&self) -> broadcast::Receiver<ViewEvent>;
}
