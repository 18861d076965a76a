//! Viewport watcher.
//!
//! Observes map movement events from the rendering surface, recomputes the
//! geographic query extent on each one, and publishes it into a single
//! latest-value slot (`tokio::sync::watch`). Consumers only ever see the
//! most recent valid extent, so a burst of drag events coalesces naturally;
//! there is no queue to drain.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::extent::{to_query_extent, GeoExtent};
use crate::layer::{RenderSurface, ViewEvent};

/// Watches the rendering surface's viewport and maintains the shared
/// latest-extent slot.
pub struct ViewportWatcher {
    surface: Arc<dyn RenderSurface>,
    extent_tx: watch::Sender<Option<GeoExtent>>,
}

impl ViewportWatcher {
    /// Creates a watcher and the receiver half of the latest-extent slot.
    ///
    /// The slot starts at `None` and is seeded from the surface's current
    /// extent when [`start`](Self::start) runs.
    pub fn new(surface: Arc<dyn RenderSurface>) -> (Self, watch::Receiver<Option<GeoExtent>>) {
        let (extent_tx, extent_rx) = watch::channel(None);
        (Self { surface, extent_tx }, extent_rx)
    }

    /// Spawns the watch loop. It runs until the cancellation token fires or
    /// the surface drops its event channel.
    pub fn start(self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut events = self.surface.subscribe_view_events();
            debug!("viewport watcher started");

            // Seed the slot so a toggle-enable before the first map event
            // still has an extent to fetch for.
            self.refresh(ViewEvent::ViewChanged);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(event) => self.refresh(event),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Only the latest extent matters; recompute it.
                            debug!(skipped, "view events lagged, refreshing from current viewport");
                            self.refresh(ViewEvent::ViewChanged);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }

            debug!("viewport watcher stopped");
        })
    }

    /// Recomputes the query extent and publishes it if it validates and
    /// differs from the slot's current value. Invalid candidates are logged
    /// and the slot is left unchanged.
    fn refresh(&self, event: ViewEvent) {
        let candidate = self.surface.display_extent();
        match to_query_extent(&candidate) {
            Ok(extent) => {
                let updated = self.extent_tx.send_if_modified(|slot| {
                    if *slot == Some(extent) {
                        false
                    } else {
                        *slot = Some(extent);
                        true
                    }
                });
                if updated {
                    trace!(?event, %extent, "published viewport extent");
                }
            }
            Err(e) => {
                warn!(extent = %candidate, error = %e, "rejected viewport extent candidate");
            }
        }
    }
}
