// Shared fakes for the test suite.

use crate::api::{ApiError, DirectoryApi};
use crate::app::App;
use crate::config::AppConfig;
use crate::domain::{
    Category, Claim, ClaimRequest, Coordinates, Itinerary, Listing, ListingId, NewItinerary,
};
use crate::filters::FilterPredicate;
use crate::map::{
    Bounds, EventTarget, InfoContent, InfoWindowHandle, ListenerHandle, MapError, MapEvent,
    MapSdk, MarkerHandle,
};
use astra::{Body, Request, Response};
use chrono::NaiveDate;
use http::Method;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Read;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn listing(id: ListingId, lat: f64, lng: f64) -> Listing {
    Listing {
        id,
        name: format!("Place {id}"),
        coordinates: Some(Coordinates::new(lat, lng)),
        category_id: 1,
        claimed: false,
        rating: Some(4.0),
        price_level: Some(2),
        tags: Vec::new(),
        amenities: Vec::new(),
        accessibility: Vec::new(),
        images: Vec::new(),
        description: None,
        address: None,
        phone: None,
        website: None,
    }
}

pub fn listing_without_location(id: ListingId) -> Listing {
    Listing {
        coordinates: None,
        ..listing(id, 0.0, 0.0)
    }
}

/// A handful of places around the central valley.
pub fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            name: "Hotel Volcán".into(),
            price_level: Some(1),
            rating: Some(4.5),
            amenities: vec!["wifi".into(), "pool".into()],
            ..listing(1, 10.4631, -84.7030)
        },
        Listing {
            name: "Soda La Esquina".into(),
            category_id: 2,
            price_level: Some(3),
            rating: Some(3.5),
            ..listing(3, 9.9281, -84.0907)
        },
        Listing {
            name: "Canopy Tours".into(),
            category_id: 3,
            claimed: true,
            price_level: Some(4),
            rating: Some(5.0),
            accessibility: vec!["step-free-entrance".into()],
            ..listing(7, 10.3000, -84.8250)
        },
        Listing {
            name: "Casa sin mapa".into(),
            ..listing_without_location(9)
        },
    ]
}

pub fn seed_categories() -> Vec<Category> {
    vec![
        Category { id: 1, name: "Accommodation".into(), slug: None, kind: None },
        Category { id: 2, name: "Restaurants".into(), slug: None, kind: None },
        Category { id: 3, name: "Attractions".into(), slug: None, kind: None },
    ]
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// In-memory directory API that filters the way the real one does.
#[derive(Default)]
pub struct FakeApi {
    pub listings: Mutex<Vec<Listing>>,
    pub categories: Vec<Category>,
    pub itineraries: Mutex<Vec<Itinerary>>,
    pub claims: Mutex<Vec<ClaimRequest>>,
    pub list_calls: AtomicUsize,
    pub fail_listings: AtomicBool,
    pub fail_itineraries: AtomicBool,
}

impl FakeApi {
    pub fn seeded() -> Self {
        Self {
            listings: Mutex::new(seed_listings()),
            categories: seed_categories(),
            itineraries: Mutex::new(vec![Itinerary {
                id: 1,
                name: "Long weekend".into(),
                start_date: date("2026-11-06"),
                end_date: date("2026-11-08"),
                notes: None,
                business_ids: vec![1, 7],
            }]),
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

fn matches(p: &FilterPredicate, l: &Listing) -> bool {
    let keyword_ok = p.keyword.as_ref().map_or(true, |k| {
        let k = k.to_lowercase();
        l.name.to_lowercase().contains(&k) || l.tags.iter().any(|t| t.to_lowercase().contains(&k))
    });
    keyword_ok
        && p.category_id.map_or(true, |c| c == l.category_id)
        && (p.price_levels.is_empty()
            || l.price_level.is_some_and(|lvl| p.price_levels.contains(&lvl)))
        && p.rating.map_or(true, |min| l.rating.is_some_and(|r| r >= min as f32))
        && p.amenities.iter().all(|a| l.amenities.contains(a))
        && p.accessibility.iter().all(|a| l.accessibility.contains(a))
}

impl DirectoryApi for FakeApi {
    fn list_businesses(&self, filters: &FilterPredicate) -> Result<Vec<Listing>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".into()));
        }
        let all = self.listings.lock().unwrap();
        Ok(all.iter().filter(|l| matches(filters, l)).cloned().collect())
    }

    fn get_business(&self, id: ListingId) -> Result<Listing, ApiError> {
        let all = self.listings.lock().unwrap();
        all.iter().find(|l| l.id == id).cloned().ok_or(ApiError::NotFound)
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories.clone())
    }

    fn list_itineraries(&self) -> Result<Vec<Itinerary>, ApiError> {
        if self.fail_itineraries.load(Ordering::SeqCst) {
            return Err(ApiError::Status { status: 503, body: "maintenance".into() });
        }
        Ok(self.itineraries.lock().unwrap().clone())
    }

    fn create_itinerary(&self, itinerary: &NewItinerary) -> Result<Itinerary, ApiError> {
        let mut all = self.itineraries.lock().unwrap();
        let id = all.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let created = Itinerary {
            id,
            name: itinerary.name.clone(),
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            notes: itinerary.notes.clone(),
            business_ids: itinerary.business_ids.clone(),
        };
        all.push(created.clone());
        Ok(created)
    }

    fn delete_itinerary(&self, id: i64) -> Result<(), ApiError> {
        let mut all = self.itineraries.lock().unwrap();
        let before = all.len();
        all.retain(|i| i.id != id);
        if all.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn create_claim(&self, claim: &ClaimRequest) -> Result<Claim, ApiError> {
        let mut claims = self.claims.lock().unwrap();
        claims.push(claim.clone());
        Ok(Claim {
            id: claims.len() as i64,
            business_id: claim.business_id,
            status: "pending".into(),
        })
    }
}

/// Everything the fake SDK currently holds, plus a call log.
#[derive(Debug, Default)]
pub struct SdkState {
    pub center: Option<Coordinates>,
    pub zoom: f64,
    /// Zoom that `fit_bounds` lands on.
    pub fit_zoom: f64,
    pub fit_calls: usize,
    pub markers: BTreeMap<MarkerHandle, (Coordinates, bool)>,
    pub info_windows: BTreeMap<InfoWindowHandle, Option<MarkerHandle>>,
    pub listeners: BTreeMap<ListenerHandle, (EventTarget, MapEvent)>,
    pub created_markers: usize,
    pub fail_init: bool,
    pub log: Vec<String>,
    next: u64,
}

impl SdkState {
    fn next(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub fn open_windows(&self) -> Vec<MarkerHandle> {
        self.info_windows.values().filter_map(|a| *a).collect()
    }

    pub fn emphasized(&self) -> Vec<MarkerHandle> {
        self.markers
            .iter()
            .filter(|(_, (_, on))| *on)
            .map(|(h, _)| *h)
            .collect()
    }
}

/// Recording SDK; clones share state so tests can inspect it after the
/// manager has been dropped.
#[derive(Clone, Default)]
pub struct FakeSdk {
    pub state: Rc<RefCell<SdkState>>,
}

impl FakeSdk {
    pub fn with_fit_zoom(zoom: f64) -> Self {
        let sdk = Self::default();
        sdk.state.borrow_mut().fit_zoom = zoom;
        sdk
    }
}

impl MapSdk for FakeSdk {
    fn create_map(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError> {
        let mut s = self.state.borrow_mut();
        if s.fail_init {
            return Err(MapError::Init("no WebGL context".into()));
        }
        s.center = Some(center);
        s.zoom = zoom;
        Ok(())
    }

    fn create_marker(&mut self, position: Coordinates, _title: &str) -> MarkerHandle {
        let mut s = self.state.borrow_mut();
        let handle = MarkerHandle(s.next());
        s.markers.insert(handle, (position, false));
        s.created_markers += 1;
        s.log.push(format!("create_marker {}", handle.0));
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        let mut s = self.state.borrow_mut();
        s.markers.remove(&marker);
        s.log.push(format!("remove_marker {}", marker.0));
    }

    fn set_marker_emphasis(&mut self, marker: MarkerHandle, emphasized: bool) {
        if let Some(m) = self.state.borrow_mut().markers.get_mut(&marker) {
            m.1 = emphasized;
        }
    }

    fn create_info_window(&mut self, _content: InfoContent) -> InfoWindowHandle {
        let mut s = self.state.borrow_mut();
        let handle = InfoWindowHandle(s.next());
        s.info_windows.insert(handle, None);
        handle
    }

    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle) {
        if let Some(w) = self.state.borrow_mut().info_windows.get_mut(&window) {
            *w = Some(anchor);
        }
    }

    fn close_info_window(&mut self, window: InfoWindowHandle) {
        if let Some(w) = self.state.borrow_mut().info_windows.get_mut(&window) {
            *w = None;
        }
    }

    fn remove_info_window(&mut self, window: InfoWindowHandle) {
        self.state.borrow_mut().info_windows.remove(&window);
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        let mut s = self.state.borrow_mut();
        s.center = Some(bounds.center());
        s.zoom = s.fit_zoom;
        s.fit_calls += 1;
    }

    fn zoom(&self) -> f64 {
        self.state.borrow().zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.borrow_mut().zoom = zoom;
    }

    fn set_center(&mut self, center: Coordinates) {
        self.state.borrow_mut().center = Some(center);
    }

    fn add_listener(&mut self, target: EventTarget, event: MapEvent) -> ListenerHandle {
        let mut s = self.state.borrow_mut();
        let handle = ListenerHandle(s.next());
        s.listeners.insert(handle, (target, event));
        handle
    }

    fn remove_listener(&mut self, listener: ListenerHandle) {
        let mut s = self.state.borrow_mut();
        s.listeners.remove(&listener);
        s.log.push(format!("remove_listener {}", listener.0));
    }
}

pub fn test_app(api: Arc<FakeApi>) -> App {
    App::new(AppConfig::default(), api)
}

pub fn test_app_with(config: AppConfig, api: Arc<FakeApi>) -> App {
    App::new(config, api)
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// The opening tag of the element carrying `needle` as an attribute.
pub fn tag_with<'a>(html: &'a str, needle: &str) -> &'a str {
    let at = html
        .find(needle)
        .unwrap_or_else(|| panic!("{needle} not found in page"));
    let start = html[..at].rfind('<').unwrap();
    let end = at + html[at..].find('>').unwrap();
    &html[start..=end]
}
