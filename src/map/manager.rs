// src/map/manager.rs

use crate::config::MapConfig;
use crate::domain::{Coordinates, Listing, ListingId};
use crate::map::sdk::{
    EventTarget, InfoContent, InfoWindowHandle, ListenerHandle, MapError, MapEvent, MapSdk,
    MarkerHandle,
};
use crate::map::Bounds;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: Coordinates,
    pub zoom: f64,
    pub max_fit_zoom: f64,
    pub selection_zoom: f64,
}

impl From<&MapConfig> for MapOptions {
    fn from(cfg: &MapConfig) -> Self {
        Self {
            center: Coordinates::new(cfg.center_lat, cfg.center_lng),
            zoom: cfg.default_zoom,
            max_fit_zoom: cfg.max_fit_zoom,
            selection_zoom: cfg.selection_zoom,
        }
    }
}

/// What a fired map listener asks the owner of the selection to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapIntent {
    Select(ListingId),
    ClearSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub kept: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

#[derive(Debug, Clone, Copy)]
enum ListenerRole {
    MarkerClick(ListingId),
    InfoClosed(ListingId),
}

struct Overlay {
    marker: MarkerHandle,
    info_window: InfoWindowHandle,
    listeners: [ListenerHandle; 2],
    position: Coordinates,
    title: String,
}

/// Owns the map and every overlay on it.
///
/// The overlay set always mirrors the last result set passed to
/// [`sync`](Self::sync) (minus listings without usable coordinates).
/// Dropping the manager releases every listener, info window and marker.
pub struct MapMarkerManager<S: MapSdk> {
    sdk: S,
    options: MapOptions,
    overlays: HashMap<ListingId, Overlay>,
    listeners: HashMap<ListenerHandle, ListenerRole>,
    emphasized: Option<ListingId>,
}

impl<S: MapSdk> MapMarkerManager<S> {
    pub fn new(mut sdk: S, options: MapOptions) -> Result<Self, MapError> {
        sdk.create_map(options.center, options.zoom)?;
        Ok(Self {
            sdk,
            options,
            overlays: HashMap::new(),
            listeners: HashMap::new(),
            emphasized: None,
        })
    }

    /// Reconciles overlays with `listings`.
    ///
    /// Overlays for ids that left are torn down, new ids get overlays, and
    /// untouched ids keep theirs. A listing whose position or name changed is
    /// rebuilt. When anything changed the view is reframed.
    pub fn sync(&mut self, listings: &[Listing]) -> SyncReport {
        let mut wanted: HashMap<ListingId, &Listing> = HashMap::new();
        for listing in listings {
            if listing.position().is_some() {
                wanted.entry(listing.id).or_insert(listing);
            }
        }

        let stale: Vec<ListingId> = self
            .overlays
            .iter()
            .filter(|(id, overlay)| match wanted.get(*id) {
                None => true,
                Some(listing) => {
                    listing.position() != Some(overlay.position) || listing.name != overlay.title
                }
            })
            .map(|(id, _)| *id)
            .collect();

        let mut report = SyncReport::default();

        for id in stale {
            self.remove_overlay(id);
            report.removed += 1;
        }
        report.kept = self.overlays.len();

        for listing in listings {
            if self.overlays.contains_key(&listing.id) {
                continue;
            }
            if let Some(position) = listing.position() {
                self.create_overlay(listing, position);
                report.added += 1;
            }
        }

        if report.changed() {
            debug!(
                added = report.added,
                removed = report.removed,
                kept = report.kept,
                "map overlays reconciled"
            );
            self.frame();
        }

        report
    }

    fn create_overlay(&mut self, listing: &Listing, position: Coordinates) {
        let marker = self.sdk.create_marker(position, &listing.name);
        let info_window = self.sdk.create_info_window(InfoContent {
            title: listing.name.clone(),
            detail: listing
                .rating_label()
                .into_iter()
                .chain(listing.price_label())
                .reduce(|a, b| format!("{a} · {b}")),
            href: format!("/businesses/{}", listing.id),
        });

        let click = self.sdk.add_listener(EventTarget::Marker(marker), MapEvent::Click);
        let closed = self
            .sdk
            .add_listener(EventTarget::InfoWindow(info_window), MapEvent::CloseClick);
        self.listeners.insert(click, ListenerRole::MarkerClick(listing.id));
        self.listeners.insert(closed, ListenerRole::InfoClosed(listing.id));

        self.overlays.insert(
            listing.id,
            Overlay {
                marker,
                info_window,
                listeners: [click, closed],
                position,
                title: listing.name.clone(),
            },
        );
    }

    /// Listeners go first so nothing can fire for a detached overlay.
    fn remove_overlay(&mut self, id: ListingId) {
        let Some(overlay) = self.overlays.remove(&id) else {
            return;
        };
        for listener in overlay.listeners {
            self.listeners.remove(&listener);
            self.sdk.remove_listener(listener);
        }
        self.sdk.close_info_window(overlay.info_window);
        self.sdk.remove_info_window(overlay.info_window);
        self.sdk.remove_marker(overlay.marker);

        if self.emphasized == Some(id) {
            self.emphasized = None;
        }
    }

    /// Fits every overlay in view without zooming past `max_fit_zoom`.
    fn frame(&mut self) {
        let Some(bounds) = Bounds::covering(self.overlays.values().map(|o| o.position)) else {
            return;
        };
        self.sdk.fit_bounds(&bounds);
        if self.sdk.zoom() > self.options.max_fit_zoom {
            self.sdk.set_zoom(self.options.max_fit_zoom);
        }
    }

    /// Emphasizes the overlay for `selected`, opens its popup and centers on
    /// it. `None` (or an id without an overlay) reverts all emphasis.
    pub fn show_selection(&mut self, selected: Option<ListingId>) {
        let target = selected.filter(|id| self.overlays.contains_key(id));

        for (id, overlay) in &self.overlays {
            let on = Some(*id) == target;
            self.sdk.set_marker_emphasis(overlay.marker, on);
            if !on {
                self.sdk.close_info_window(overlay.info_window);
            }
        }

        if let Some(overlay) = target.and_then(|id| self.overlays.get(&id)) {
            self.sdk.open_info_window(overlay.info_window, overlay.marker);
            self.sdk.set_center(overlay.position);
            self.sdk.set_zoom(self.options.selection_zoom);
        }

        self.emphasized = target;
    }

    /// Translates a fired SDK listener. Unknown handles (already released)
    /// are ignored.
    pub fn handle_event(&mut self, listener: ListenerHandle) -> Option<MapIntent> {
        match self.listeners.get(&listener).copied()? {
            ListenerRole::MarkerClick(id) => Some(MapIntent::Select(id)),
            ListenerRole::InfoClosed(id) if self.emphasized == Some(id) => {
                Some(MapIntent::ClearSelection)
            }
            ListenerRole::InfoClosed(_) => None,
        }
    }

    pub fn overlay_ids(&self) -> BTreeSet<ListingId> {
        self.overlays.keys().copied().collect()
    }

    pub fn marker_for(&self, id: ListingId) -> Option<MarkerHandle> {
        self.overlays.get(&id).map(|o| o.marker)
    }

    /// Listener handle that selects `id` when fired.
    pub fn click_listener_for(&self, id: ListingId) -> Option<ListenerHandle> {
        self.overlays.get(&id).map(|o| o.listeners[0])
    }

    pub fn close_listener_for(&self, id: ListingId) -> Option<ListenerHandle> {
        self.overlays.get(&id).map(|o| o.listeners[1])
    }

    pub fn emphasized(&self) -> Option<ListingId> {
        self.emphasized
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    fn teardown(&mut self) {
        let ids: Vec<ListingId> = self.overlays.keys().copied().collect();
        for id in ids {
            self.remove_overlay(id);
        }

        // Nothing should be left, but never leave a registered callback behind.
        let leftover: HashSet<ListenerHandle> = self.listeners.drain().map(|(h, _)| h).collect();
        for listener in leftover {
            self.sdk.remove_listener(listener);
        }
        self.emphasized = None;
    }
}

impl<S: MapSdk> Drop for MapMarkerManager<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The map area of a page: a live manager, or the reason there is none.
pub enum MapView<S: MapSdk> {
    Ready(MapMarkerManager<S>),
    Unavailable(String),
}

impl<S: MapSdk> MapView<S> {
    /// Never fails: SDK load or init errors become [`MapView::Unavailable`].
    pub fn load(sdk: Result<S, MapError>, options: MapOptions) -> Self {
        match sdk.and_then(|sdk| MapMarkerManager::new(sdk, options)) {
            Ok(manager) => MapView::Ready(manager),
            Err(err) => {
                warn!(error = %err, "map unavailable, falling back to list only");
                MapView::Unavailable(err.to_string())
            }
        }
    }

    pub fn manager(&self) -> Option<&MapMarkerManager<S>> {
        match self {
            MapView::Ready(manager) => Some(manager),
            MapView::Unavailable(_) => None,
        }
    }

    pub fn manager_mut(&mut self) -> Option<&mut MapMarkerManager<S>> {
        match self {
            MapView::Ready(manager) => Some(manager),
            MapView::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            MapView::Ready(_) => None,
            MapView::Unavailable(reason) => Some(reason),
        }
    }
}
