// src/view.rs
//
// Page composition: the list and the map read the same results and the same
// selection.

use crate::domain::{Listing, ListingId};
use crate::filters::store::join_query;
use crate::filters::{FilterPredicate, FilterStore};
use crate::map::{ListenerHandle, MapIntent, MapSdk, MapView};
use crate::query::QueryState;
use tracing::debug;

pub const SELECTED_PARAM: &str = "selected";

/// At most one selected listing, shared by every view of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ListingId>,
}

impl SelectionState {
    pub fn get(&self) -> Option<ListingId> {
        self.selected
    }

    pub fn set(&mut self, id: ListingId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is(&self, id: ListingId) -> bool {
        self.selected == Some(id)
    }
}

pub struct DirectoryView<S: MapSdk> {
    store: FilterStore,
    filters: FilterPredicate,
    results: QueryState,
    selection: SelectionState,
    map: MapView<S>,
}

impl<S: MapSdk> DirectoryView<S> {
    pub fn new(store: FilterStore, map: MapView<S>) -> Self {
        let filters = store.read_from_url();
        Self {
            store,
            filters,
            results: QueryState::Idle,
            selection: SelectionState::default(),
            map,
        }
    }

    /// Applies new filters: the URL gets the canonical query, the selection
    /// is cleared. Returns true when the URL changed.
    pub fn set_filters(&mut self, filters: FilterPredicate) -> bool {
        self.filters = filters.normalized();
        let changed = self.store.write_to_url(&self.filters);
        self.clear_selection();
        changed
    }

    /// Rewrites a non-canonical URL (malformed values, odd key order, empty
    /// keys) to the canonical one. Returns true when a rewrite happened.
    pub fn canonicalize_url(&mut self) -> bool {
        let filters = self.store.read_from_url();
        if filters.to_query() == self.store.history().current() {
            return false;
        }
        self.set_filters(filters)
    }

    /// Back/forward landed on another entry: reload filters from the URL.
    pub fn sync_from_url(&mut self) {
        self.filters = self.store.read_from_url();
        self.clear_selection();
    }

    pub fn show_results(&mut self, results: QueryState) {
        match &results {
            QueryState::Ready(listings) => {
                if let Some(manager) = self.map.manager_mut() {
                    manager.sync(listings);
                }
                if let Some(id) = self.selection.get() {
                    if !listings.iter().any(|l| l.id == id) {
                        debug!(id, "selected listing left the result set");
                        self.clear_selection();
                    }
                }
            }
            QueryState::Failed(_) => {
                if let Some(manager) = self.map.manager_mut() {
                    manager.sync(&[]);
                }
                self.clear_selection();
            }
            QueryState::Idle | QueryState::Pending => {}
        }
        self.results = results;
    }

    /// Only listings in the current results can be selected. A listing
    /// without map coordinates is selected in the list only; the map shows
    /// no emphasis for it.
    pub fn select(&mut self, id: ListingId) -> bool {
        if !self.listings().iter().any(|l| l.id == id) {
            return false;
        }
        self.selection.set(id);
        if let Some(manager) = self.map.manager_mut() {
            manager.show_selection(Some(id));
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        if let Some(manager) = self.map.manager_mut() {
            manager.show_selection(None);
        }
    }

    pub fn handle_map_event(&mut self, listener: ListenerHandle) {
        let intent = self.map.manager_mut().and_then(|m| m.handle_event(listener));
        match intent {
            Some(MapIntent::Select(id)) => {
                self.select(id);
            }
            Some(MapIntent::ClearSelection) => self.clear_selection(),
            None => {}
        }
    }

    pub fn filters(&self) -> &FilterPredicate {
        &self.filters
    }

    pub fn results(&self) -> &QueryState {
        &self.results
    }

    pub fn listings(&self) -> &[Listing] {
        self.results.listings()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn map(&self) -> &MapView<S> {
        &self.map
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FilterStore {
        &mut self.store
    }

    /// Current page URL, without selection.
    pub fn url(&self) -> String {
        self.store.url()
    }

    pub fn href(&self, filters: &FilterPredicate) -> String {
        self.store.href(filters)
    }

    /// Current filters plus `selected=<id>`.
    pub fn select_href(&self, id: ListingId) -> String {
        let query = self.filters.to_query();
        let selected = format!("{SELECTED_PARAM}={id}");
        if query.is_empty() {
            join_query(self.store.path(), &selected)
        } else {
            join_query(self.store.path(), &format!("{query}&{selected}"))
        }
    }
}

/// Splits `selected` out of a raw query string. Returns the remaining query
/// (order preserved) and the first parseable selected id.
pub fn split_selection(raw_query: &str) -> (String, Option<ListingId>) {
    let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
    let mut selected = None;
    let rest: Vec<&str> = raw_query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((*pair, ""));
            if key != SELECTED_PARAM {
                return true;
            }
            if selected.is_none() {
                selected = value.parse::<ListingId>().ok();
            }
            false
        })
        .collect();
    (rest.join("&"), selected)
}
