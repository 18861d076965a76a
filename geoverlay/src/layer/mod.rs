//! Overlay layer records and the rendering-surface seam.
//!
//! An [`OverlayLayer`] is a named, typed renderable unit. The name is the
//! only key used for attach/detach/lookup; the kind and payload are
//! first-class fields rather than ad-hoc properties hung on the rendering
//! surface's objects.
//!
//! The rendering surface itself (tiles, gestures, projection primitives) is
//! an external collaborator behind the [`RenderSurface`] trait.

mod surface;
mod types;

pub use surface::{RenderSurface, SurfaceError};
pub use types::{
    LayerHandle, LayerKind, LayerSource, OverlayLayer, RasterSourceDescriptor, ViewEvent,
};

#[cfg(test)]
pub use surface::tests::MockSurface;
