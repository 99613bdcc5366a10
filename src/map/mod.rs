pub mod geo;
pub mod manager;
pub mod scene;
pub mod sdk;

pub use geo::Bounds;
pub use manager::{MapIntent, MapMarkerManager, MapOptions, MapView, SyncReport};
pub use scene::SceneMap;
pub use sdk::{
    EventTarget, InfoContent, InfoWindowHandle, ListenerHandle, MapError, MapEvent, MapSdk,
    MarkerHandle,
};
