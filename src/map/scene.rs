// src/map/scene.rs
//
// Built-in map backend: keeps the map as an in-memory scene that the
// templates render as positioned HTML markers.

use crate::config::MapConfig;
use crate::domain::Coordinates;
use crate::map::geo::{self, MAX_ZOOM};
use crate::map::sdk::{
    EventTarget, InfoContent, InfoWindowHandle, ListenerHandle, MapError, MapEvent, MapSdk,
    MarkerHandle,
};
use crate::map::Bounds;
use std::collections::BTreeMap;

const FIT_PADDING_PX: f64 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    pub handle: MarkerHandle,
    pub position: Coordinates,
    pub title: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneInfoWindow {
    pub content: InfoContent,
    /// Set while open.
    pub anchor: Option<MarkerHandle>,
}

#[derive(Debug, Clone)]
pub struct SceneMap {
    width: u32,
    height: u32,
    center: Coordinates,
    zoom: f64,
    markers: BTreeMap<MarkerHandle, SceneMarker>,
    info_windows: BTreeMap<InfoWindowHandle, SceneInfoWindow>,
    listeners: BTreeMap<ListenerHandle, (EventTarget, MapEvent)>,
    next_handle: u64,
}

impl SceneMap {
    /// Fails when the map is switched off in config or the viewport is empty.
    pub fn load(cfg: &MapConfig) -> Result<Self, MapError> {
        if !cfg.enabled {
            return Err(MapError::Load("map is disabled".into()));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(MapError::Load(format!(
                "invalid viewport {}x{}",
                cfg.width, cfg.height
            )));
        }
        Ok(Self {
            width: cfg.width,
            height: cfg.height,
            center: Coordinates::new(cfg.center_lat, cfg.center_lng),
            zoom: cfg.default_zoom,
            markers: BTreeMap::new(),
            info_windows: BTreeMap::new(),
            listeners: BTreeMap::new(),
            next_handle: 0,
        })
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn markers(&self) -> impl Iterator<Item = &SceneMarker> {
        self.markers.values()
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&SceneMarker> {
        self.markers.get(&handle)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn info_window_count(&self) -> usize {
        self.info_windows.len()
    }

    /// The open popup and the marker it hangs from.
    pub fn open_info_window(&self) -> Option<(&SceneInfoWindow, &SceneMarker)> {
        self.info_windows.values().find_map(|window| {
            let anchor = window.anchor?;
            self.markers.get(&anchor).map(|marker| (window, marker))
        })
    }

    /// Position inside the viewport as percentages of width and height, or
    /// `None` when the point is outside the current view.
    pub fn viewport_position(&self, c: Coordinates) -> Option<(f64, f64)> {
        let (cx, cy) = geo::project(self.center, self.zoom);
        let (px, py) = geo::project(c, self.zoom);
        let x = px - cx + self.width as f64 / 2.0;
        let y = py - cy + self.height as f64 / 2.0;

        let inside = (0.0..=self.width as f64).contains(&x) && (0.0..=self.height as f64).contains(&y);
        inside.then(|| (x / self.width as f64 * 100.0, y / self.height as f64 * 100.0))
    }
}

impl MapSdk for SceneMap {
    fn create_map(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError> {
        if !center.is_valid() {
            return Err(MapError::Init(format!(
                "invalid center {},{}",
                center.lat, center.lng
            )));
        }
        if !(0.0..=MAX_ZOOM).contains(&zoom) {
            return Err(MapError::Init(format!("zoom {zoom} out of range")));
        }
        self.center = center;
        self.zoom = zoom;
        Ok(())
    }

    fn create_marker(&mut self, position: Coordinates, title: &str) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers.insert(
            handle,
            SceneMarker {
                handle,
                position,
                title: title.to_string(),
                emphasized: false,
            },
        );
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }

    fn set_marker_emphasis(&mut self, marker: MarkerHandle, emphasized: bool) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.emphasized = emphasized;
        }
    }

    fn create_info_window(&mut self, content: InfoContent) -> InfoWindowHandle {
        let handle = InfoWindowHandle(self.next());
        self.info_windows.insert(
            handle,
            SceneInfoWindow {
                content,
                anchor: None,
            },
        );
        handle
    }

    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle) {
        if let Some(w) = self.info_windows.get_mut(&window) {
            w.anchor = Some(anchor);
        }
    }

    fn close_info_window(&mut self, window: InfoWindowHandle) {
        if let Some(w) = self.info_windows.get_mut(&window) {
            w.anchor = None;
        }
    }

    fn remove_info_window(&mut self, window: InfoWindowHandle) {
        self.info_windows.remove(&window);
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.center = bounds.center();
        self.zoom = bounds.zoom_to_fit(self.width as f64, self.height as f64, FIT_PADDING_PX);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(0.0, MAX_ZOOM);
    }

    fn set_center(&mut self, center: Coordinates) {
        if center.is_valid() {
            self.center = center;
        }
    }

    fn add_listener(&mut self, target: EventTarget, event: MapEvent) -> ListenerHandle {
        let handle = ListenerHandle(self.next());
        self.listeners.insert(handle, (target, event));
        handle
    }

    fn remove_listener(&mut self, listener: ListenerHandle) {
        self.listeners.remove(&listener);
    }
}
