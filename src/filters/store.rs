// src/filters/store.rs

use crate::filters::FilterPredicate;
use tracing::debug;

pub type SubscriptionId = usize;

type UrlListener = Box<dyn FnMut(&FilterPredicate)>;

/// Address-bar history for one page: query strings plus a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial_query: &str) -> Self {
        Self {
            entries: vec![initial_query.trim_start_matches('?').to_string()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// New entry after the cursor; forward entries are discarded.
    fn push(&mut self, query: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor += 1;
    }

    fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

/// Single owner of the filter state, two-way bound to the page URL.
///
/// Reads always parse the current history entry; writes push a canonical
/// entry. Subscribers hear only about external navigation (back/forward),
/// never about the store's own writes.
pub struct FilterStore {
    path: String,
    history: History,
    listeners: Vec<(SubscriptionId, UrlListener)>,
    next_subscription: SubscriptionId,
}

impl FilterStore {
    pub fn new(path: impl Into<String>, history: History) -> Self {
        Self {
            path: path.into(),
            history,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn read_from_url(&self) -> FilterPredicate {
        FilterPredicate::from_query(self.history.current())
    }

    /// Pushes the canonical form of `predicate`. Returns false when the URL
    /// already holds exactly that query.
    pub fn write_to_url(&mut self, predicate: &FilterPredicate) -> bool {
        let query = predicate.to_query();
        if query == self.history.current() {
            return false;
        }
        debug!(%query, "filter state written to url");
        self.history.push(query);
        true
    }

    pub fn on_external_url_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&FilterPredicate) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Browser "back". Notifies subscribers when the entry changed.
    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.notify();
        }
        moved
    }

    /// Browser "forward".
    pub fn forward(&mut self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.notify();
        }
        moved
    }

    fn notify(&mut self) {
        let predicate = self.read_from_url();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&predicate);
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current URL (path plus query).
    pub fn url(&self) -> String {
        join_query(&self.path, self.history.current())
    }

    /// URL the page would have with `predicate` applied.
    pub fn href(&self, predicate: &FilterPredicate) -> String {
        join_query(&self.path, &predicate.to_query())
    }
}

pub fn join_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
