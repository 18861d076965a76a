//! Overlay registry: the authoritative set of attached overlay layers.
//!
//! The registry is the only component holding rendering handles. Attach is
//! idempotent by name (replace, not accumulate), so the visible set never
//! contains two layers of the same logical name. All operations are
//! synchronous and safe to call from controller transition handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::layer::{LayerHandle, LayerKind, OverlayLayer, RenderSurface, SurfaceError};

/// Registry record for an attached layer.
#[derive(Debug, Clone, Copy)]
struct AttachedLayer {
    kind: LayerKind,
    handle: LayerHandle,
}

/// Tracks which named overlay layers are currently attached to the map.
pub struct OverlayRegistry {
    surface: Arc<dyn RenderSurface>,
    attached: HashMap<String, AttachedLayer>,
}

impl OverlayRegistry {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            surface,
            attached: HashMap::new(),
        }
    }

    /// Attaches a layer under its name, detaching any prior layer of the
    /// same name first.
    pub fn attach(&mut self, layer: OverlayLayer) -> Result<(), SurfaceError> {
        if let Some(prev) = self.attached.remove(&layer.name) {
            debug!(name = %layer.name, "replacing previously attached layer");
            if let Err(e) = self.surface.remove_layer(prev.handle) {
                warn!(name = %layer.name, error = %e, "failed to remove replaced layer");
            }
        }

        let handle = self.surface.add_layer(&layer)?;
        debug!(name = %layer.name, kind = %layer.kind, %handle, "attached overlay layer");
        self.attached.insert(
            layer.name,
            AttachedLayer {
                kind: layer.kind,
                handle,
            },
        );
        Ok(())
    }

    /// Detaches the layer with the given name. Returns false if no such
    /// layer is attached.
    pub fn detach(&mut self, name: &str) -> bool {
        match self.attached.remove(name) {
            Some(layer) => {
                if let Err(e) = self.surface.remove_layer(layer.handle) {
                    warn!(name, error = %e, "failed to remove detached layer");
                }
                debug!(name, "detached overlay layer");
                true
            }
            None => false,
        }
    }

    /// Detaches every layer whose name satisfies the predicate. Absence of
    /// matches is not an error. Returns the number of layers detached.
    pub fn detach_all<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&str) -> bool,
    {
        let names: Vec<String> = self
            .attached
            .keys()
            .filter(|name| predicate(name))
            .cloned()
            .collect();
        for name in &names {
            self.detach(name);
        }
        names.len()
    }

    pub fn has(&self, name: &str) -> bool {
        self.attached.contains_key(name)
    }

    /// Kind of the attached layer with the given name, if any.
    pub fn kind_of(&self, name: &str) -> Option<LayerKind> {
        self.attached.get(name).map(|l| l.kind)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Names of all attached layers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attached.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MockSurface;

    fn vector_layer(name: &str) -> OverlayLayer {
        OverlayLayer::vector(name, geojson::FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        })
    }

    fn registry() -> (OverlayRegistry, Arc<MockSurface>) {
        let surface = Arc::new(MockSurface::with_geographic_extent(-1.0, -1.0, 1.0, 1.0));
        (OverlayRegistry::new(surface.clone()), surface)
    }

    #[test]
    fn test_attach_and_has() {
        let (mut registry, surface) = registry();
        registry.attach(vector_layer("Overlay")).unwrap();

        assert!(registry.has("Overlay"));
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.attached_names(), vec!["Overlay"]);
    }

    #[test]
    fn test_attach_is_idempotent_by_name() {
        let (mut registry, surface) = registry();
        registry.attach(vector_layer("Overlay")).unwrap();
        registry.attach(vector_layer("Overlay")).unwrap();

        // Exactly one layer of that name, and it is the second one.
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.attached_count(), 1);
        assert_eq!(surface.attached_names(), vec!["Overlay"]);
    }

    #[test]
    fn test_detach_removes_from_surface() {
        let (mut registry, surface) = registry();
        registry.attach(vector_layer("Overlay")).unwrap();

        assert!(registry.detach("Overlay"));
        assert!(!registry.has("Overlay"));
        assert_eq!(surface.attached_count(), 0);

        // Detaching again is not an error, just a no-op.
        assert!(!registry.detach("Overlay"));
    }

    #[test]
    fn test_detach_all_by_predicate() {
        let (mut registry, surface) = registry();
        registry.attach(vector_layer("Overlay: a.tif")).unwrap();
        registry.attach(vector_layer("Overlay: b.tif")).unwrap();
        registry.attach(vector_layer("Basemap")).unwrap();

        let removed = registry.detach_all(|name| name.starts_with("Overlay"));
        assert_eq!(removed, 2);
        assert_eq!(registry.names(), vec!["Basemap"]);
        assert_eq!(surface.attached_names(), vec!["Basemap"]);
    }

    #[test]
    fn test_detach_all_without_matches_is_noop() {
        let (mut registry, _surface) = registry();
        registry.attach(vector_layer("Basemap")).unwrap();
        assert_eq!(registry.detach_all(|name| name.starts_with("Overlay")), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_attach_failure_leaves_registry_unchanged() {
        let (mut registry, surface) = registry();
        *surface.fail_next_add.lock().unwrap() = Some("bad geometry".into());

        let err = registry.attach(vector_layer("Overlay")).unwrap_err();
        assert!(matches!(err, SurfaceError::AddFailed { .. }));
        assert!(!registry.has("Overlay"));
        assert_eq!(surface.attached_count(), 0);
    }

    #[test]
    fn test_kind_of() {
        let (mut registry, _surface) = registry();
        registry.attach(vector_layer("Overlay")).unwrap();
        assert_eq!(registry.kind_of("Overlay"), Some(LayerKind::Vector));
        assert_eq!(registry.kind_of("missing"), None);
    }
}
