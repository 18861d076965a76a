//! Toggle controller.
//!
//! A small state machine reacting to the "show overlay" toggle and to
//! viewport-extent changes. It orchestrates fetches against the overlay
//! data backend and reconciles the overlay registry, but holds no rendering
//! handles itself.
//!
//! States and transitions:
//!
//! ```text
//! Disabled --toggle on--------------------> Loading   (issue fetch)
//! Loading  --fetch ok, generation latest--> Displayed (attach, replacing)
//! Loading  --fetch ok, generation stale---> Loading   (discard silently)
//! Loading  --fetch failure----------------> Error     (owned layers, if any,
//!                                                      stay attached)
//! Displayed --toggle off------------------> Disabled  (detach owned layers)
//! Displayed --extent changed--------------> Loading   (previous layer stays
//!                                                      visible until the new
//!                                                      fetch resolves)
//! Error    --toggle off-------------------> Disabled
//! Error    --extent change / re-toggle----> Loading   (retry)
//! ```
//!
//! Fetches run as spawned tasks and re-enter the machine as events, so out
//! of order completion is handled purely by the generation counter; an
//! in-flight request is never aborted at the transport level, only its
//! result discarded if stale.
//!
//! A failure never tears down what is already on the map: the previously
//! displayed layers stay attached through `Error` until a newer fetch
//! replaces them or the overlay is toggled off.

mod events;

pub use events::{ControllerConfig, ControllerEvent, ControllerState, FetchPayload};

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::archive;
use crate::config::{ActivationMode, OverlayMode};
use crate::extent::{Crs, GeoExtent};
use crate::fetcher::{FetchError, OverlayFetcher};
use crate::geojson_util;
use crate::layer::OverlayLayer;
use crate::registry::OverlayRegistry;

/// Cloneable handle for driving and observing a running controller.
#[derive(Clone)]
pub struct ControllerHandle {
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    status_rx: watch::Receiver<ControllerState>,
}

impl ControllerHandle {
    /// Sends a toggle event. A no-op once the controller has stopped.
    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.events_tx.send(ControllerEvent::Toggle(enabled));
    }

    /// Current controller state.
    pub fn state(&self) -> ControllerState {
        self.status_rx.borrow().clone()
    }

    /// Waits until the state satisfies the predicate. Returns the last
    /// observed state, which may not satisfy the predicate if the
    /// controller stopped first.
    pub async fn wait_for<P>(&mut self, predicate: P) -> ControllerState
    where
        P: Fn(&ControllerState) -> bool,
    {
        loop {
            let current = self.status_rx.borrow_and_update().clone();
            if predicate(&current) {
                return current;
            }
            if self.status_rx.changed().await.is_err() {
                return current;
            }
        }
    }
}

/// The toggle controller state machine.
///
/// Use [`ToggleController::spawn`] to run it as a task; the machine itself
/// processes one event at a time and performs no blocking work.
pub struct ToggleController<F: OverlayFetcher + 'static> {
    fetcher: Arc<F>,
    registry: OverlayRegistry,
    overlay_name: String,
    mode: OverlayMode,
    display_crs: Crs,

    state: ControllerState,
    enabled: bool,
    /// Most recent valid extent seen, whether or not the overlay is on.
    latest_extent: Option<GeoExtent>,
    /// Extent of the most recently issued fetch; suppresses duplicate
    /// requests for an unchanged viewport.
    last_requested: Option<GeoExtent>,
    next_generation: u64,
    latest_generation: u64,

    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    status_tx: watch::Sender<ControllerState>,
}

impl<F: OverlayFetcher + 'static> ToggleController<F> {
    fn new(
        fetcher: Arc<F>,
        registry: OverlayRegistry,
        config: ControllerConfig,
    ) -> (
        Self,
        ControllerHandle,
        mpsc::UnboundedReceiver<ControllerEvent>,
    ) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(ControllerState::Disabled);

        let controller = Self {
            fetcher,
            registry,
            overlay_name: config.overlay_name,
            mode: config.mode,
            display_crs: config.display_crs,
            state: ControllerState::Disabled,
            enabled: false,
            latest_extent: None,
            last_requested: None,
            next_generation: 0,
            latest_generation: 0,
            events_tx: events_tx.clone(),
            status_tx,
        };
        let handle = ControllerHandle {
            events_tx,
            status_rx,
        };
        (controller, handle, events_rx)
    }

    /// Spawns the controller event loop.
    ///
    /// The loop consumes toggle events from the returned handle, extent
    /// updates from the shared latest-extent slot, and fetch completions.
    /// It runs until cancelled (or all senders close) and detaches every
    /// owned layer on the way out.
    pub fn spawn(
        fetcher: Arc<F>,
        registry: OverlayRegistry,
        config: ControllerConfig,
        mut extent_rx: watch::Receiver<Option<GeoExtent>>,
        cancel: CancellationToken,
    ) -> (ControllerHandle, tokio::task::JoinHandle<()>) {
        let auto_enable = config.activation == ActivationMode::Auto;
        let (mut controller, handle, mut events_rx) = Self::new(fetcher, registry, config);

        let task = tokio::spawn(async move {
            debug!(overlay = %controller.overlay_name, "toggle controller started");
            // Pick up whatever the slot already holds; `changed()` only
            // fires for values sent after this point.
            controller.latest_extent = *extent_rx.borrow_and_update();
            if auto_enable {
                controller.process_event(ControllerEvent::Toggle(true));
            }
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = extent_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let extent = *extent_rx.borrow_and_update();
                        if let Some(extent) = extent {
                            controller.process_event(ControllerEvent::ExtentChanged(extent));
                        }
                    }
                    event = events_rx.recv() => match event {
                        Some(event) => controller.process_event(event),
                        None => break,
                    },
                }
            }
            controller.teardown();
        });

        (handle, task)
    }

    fn process_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Toggle(enabled) => self.on_toggle(enabled),
            ControllerEvent::ExtentChanged(extent) => self.on_extent_changed(extent),
            ControllerEvent::FetchResolved {
                generation,
                outcome,
            } => self.on_fetch_resolved(generation, outcome),
        }
    }

    fn on_toggle(&mut self, enabled: bool) {
        if enabled == self.enabled {
            trace!(enabled, "toggle unchanged, ignoring");
            return;
        }
        self.enabled = enabled;
        if enabled {
            info!(overlay = %self.overlay_name, "overlay enabled");
            self.begin_fetch();
        } else {
            let removed = self.detach_owned();
            info!(overlay = %self.overlay_name, removed, "overlay disabled");
            self.last_requested = None;
            self.set_state(ControllerState::Disabled);
        }
    }

    fn on_extent_changed(&mut self, extent: GeoExtent) {
        self.latest_extent = Some(extent);
        if !self.enabled {
            trace!(%extent, "extent changed while disabled, ignoring");
            return;
        }
        if self.last_requested == Some(extent) {
            trace!(%extent, "extent unchanged since last request, ignoring");
            return;
        }
        self.begin_fetch();
    }

    /// Issues a fetch for the latest extent under a fresh generation and
    /// enters `Loading`. With no valid extent yet, stays in `Loading` until
    /// one arrives.
    fn begin_fetch(&mut self) {
        let Some(extent) = self.latest_extent else {
            debug!("overlay enabled before a valid extent is available, waiting");
            self.set_state(ControllerState::Loading);
            return;
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        self.latest_generation = generation;
        self.last_requested = Some(extent);
        self.set_state(ControllerState::Loading);
        debug!(generation, %extent, mode = %self.mode, "issuing overlay fetch");

        let fetcher = Arc::clone(&self.fetcher);
        let events_tx = self.events_tx.clone();
        let mode = self.mode;
        tokio::spawn(async move {
            let outcome = match mode {
                OverlayMode::Vector => fetcher
                    .fetch_vector(extent)
                    .await
                    .map(FetchPayload::Vector),
                OverlayMode::RasterTiles => fetcher
                    .fetch_raster_source(extent)
                    .await
                    .map(FetchPayload::RasterSource),
                OverlayMode::RasterArchive => fetcher
                    .fetch_raster_archive(extent)
                    .await
                    .map(FetchPayload::RasterArchive),
            };
            // The controller may already have stopped; nothing to do then.
            let _ = events_tx.send(ControllerEvent::FetchResolved {
                generation,
                outcome,
            });
        });
    }

    fn on_fetch_resolved(
        &mut self,
        generation: u64,
        outcome: Result<FetchPayload, FetchError>,
    ) {
        if generation < self.latest_generation {
            debug!(
                generation,
                latest = self.latest_generation,
                "discarding stale fetch response"
            );
            return;
        }
        if !self.enabled {
            debug!(generation, "fetch resolved after toggle-off, discarding");
            return;
        }
        match outcome {
            Ok(payload) => self.display(payload),
            Err(e) => {
                warn!(generation, error = %e, "overlay fetch failed");
                self.set_state(ControllerState::Error {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Builds layers from the payload and reconciles the registry: owned
    /// layers absent from the new set are swept, the rest replaced in
    /// place, so the previous overlay stays visible right up to the swap.
    fn display(&mut self, payload: FetchPayload) {
        let layers = match self.build_layers(payload) {
            Ok(layers) => layers,
            Err(reason) => {
                warn!(%reason, "failed to construct overlay layers");
                self.set_state(ControllerState::Error { reason });
                return;
            }
        };

        let keep: HashSet<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        let overlay_name = self.overlay_name.clone();
        self.registry
            .detach_all(|name| is_owned_name(&overlay_name, name) && !keep.contains(name));

        let attached = layers.len();
        for layer in layers {
            let name = layer.name.clone();
            if let Err(e) = self.registry.attach(layer) {
                warn!(%name, error = %e, "failed to attach overlay layer");
                self.detach_owned();
                self.set_state(ControllerState::Error {
                    reason: e.to_string(),
                });
                return;
            }
        }

        info!(overlay = %self.overlay_name, layers = attached, "overlay displayed");
        self.set_state(ControllerState::Displayed);
    }

    fn build_layers(&self, payload: FetchPayload) -> Result<Vec<OverlayLayer>, String> {
        match payload {
            FetchPayload::Vector(collection) => {
                let projected = geojson_util::to_display_crs(&collection, self.display_crs);
                Ok(vec![OverlayLayer::vector(
                    self.overlay_name.clone(),
                    projected,
                )])
            }
            FetchPayload::RasterSource(descriptor) => Ok(vec![OverlayLayer::raster_tile(
                self.overlay_name.clone(),
                descriptor,
            )]),
            FetchPayload::RasterArchive(bytes) => {
                let entries = archive::extract_rasters(&bytes).map_err(|e| e.to_string())?;
                if entries.is_empty() {
                    return Err("archive contained no raster entries".to_string());
                }
                Ok(entries
                    .into_iter()
                    .map(|entry| {
                        let name = format!("{}: {}", self.overlay_name, entry.filename);
                        OverlayLayer::raster_image(name, entry.filename, entry.data)
                    })
                    .collect())
            }
        }
    }

    fn detach_owned(&mut self) -> usize {
        let overlay_name = self.overlay_name.clone();
        self.registry
            .detach_all(|name| is_owned_name(&overlay_name, name))
    }

    fn teardown(&mut self) {
        let removed = self.detach_owned();
        self.enabled = false;
        self.set_state(ControllerState::Disabled);
        debug!(removed, "toggle controller stopped");
    }

    fn set_state(&mut self, state: ControllerState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "controller state transition");
            self.state = state.clone();
            let _ = self.status_tx.send(state);
        }
    }
}

/// Whether a registry name belongs to this controller's logical overlay:
/// the name itself, or an archive entry key `"<name>: <filename>"`.
fn is_owned_name(overlay_name: &str, name: &str) -> bool {
    name == overlay_name
        || name
            .strip_prefix(overlay_name)
            .is_some_and(|rest| rest.starts_with(": "))
}
