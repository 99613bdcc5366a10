// src/map/sdk.rs
//
// The surface of a mapping SDK that the marker manager relies on.

use crate::domain::Coordinates;
use crate::map::Bounds;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoWindowHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEvent {
    Click,
    /// The user closed an info window.
    CloseClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Marker(MarkerHandle),
    InfoWindow(InfoWindowHandle),
}

/// Popup body for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoContent {
    pub title: String,
    pub detail: Option<String>,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("map SDK failed to load: {0}")]
    Load(String),
    #[error("map failed to initialize: {0}")]
    Init(String),
}

pub trait MapSdk {
    fn create_map(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError>;

    fn create_marker(&mut self, position: Coordinates, title: &str) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);
    fn set_marker_emphasis(&mut self, marker: MarkerHandle, emphasized: bool);

    fn create_info_window(&mut self, content: InfoContent) -> InfoWindowHandle;
    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle);
    fn close_info_window(&mut self, window: InfoWindowHandle);
    fn remove_info_window(&mut self, window: InfoWindowHandle);

    fn fit_bounds(&mut self, bounds: &Bounds);
    fn zoom(&self) -> f64;
    fn set_zoom(&mut self, zoom: f64);
    fn set_center(&mut self, center: Coordinates);

    fn add_listener(&mut self, target: EventTarget, event: MapEvent) -> ListenerHandle;
    fn remove_listener(&mut self, listener: ListenerHandle);
}
