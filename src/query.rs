// src/query.rs

use crate::api::ApiError;
use crate::domain::Listing;
use crate::filters::FilterPredicate;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub type Sequence = u64;

/// What the view renders for the current predicate.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Pending,
    Ready(Arc<[Listing]>),
    Failed(String),
}

impl QueryState {
    pub fn listings(&self) -> &[Listing] {
        match self {
            QueryState::Ready(data) => data.as_ref(),
            _ => &[],
        }
    }
}

/// Handle for one issued request. Carries the serialized predicate it was
/// issued for and its place in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: Sequence,
    key: String,
}

impl Ticket {
    pub fn sequence(&self) -> Sequence {
        self.seq
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// Served from cache; already applied.
    Cached(Arc<[Listing]>),
    /// The same predicate is already in flight; its completion will serve this one.
    Joined(Ticket),
    /// Caller performs the request and hands the result to [`ListingQuery::finish`].
    Fetch(Ticket),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub outcome: Result<Arc<[Listing]>, String>,
    /// False when a newer predicate was issued meanwhile.
    pub applied: bool,
}

struct CacheEntry {
    data: Arc<[Listing]>,
    stored_at: Instant,
}

/// Listing fetches keyed by the canonical query string.
///
/// * identical predicates share a cached or in-flight result;
/// * errors are never cached;
/// * only completions for the most recently issued predicate reach `state`.
pub struct ListingQuery {
    cache: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    capacity: usize,
    ttl: Option<Duration>,
    in_flight: HashMap<String, Sequence>,
    next_seq: Sequence,
    latest: Option<(Sequence, String, FilterPredicate)>,
    state: QueryState,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::with_limits(256, None)
    }

    pub fn with_limits(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            cache: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            ttl,
            in_flight: HashMap::new(),
            next_seq: 0,
            latest: None,
            state: QueryState::Idle,
        }
    }

    pub fn begin(&mut self, predicate: &FilterPredicate) -> Issue {
        self.next_seq += 1;
        let seq = self.next_seq;
        let key = predicate.to_query();
        self.latest = Some((seq, key.clone(), predicate.normalized()));

        if let Some(data) = self.cached(&key) {
            debug!(%key, seq, "listing cache hit");
            self.state = QueryState::Ready(data.clone());
            return Issue::Cached(data);
        }

        self.state = QueryState::Pending;
        let ticket = Ticket { seq, key };

        if self.in_flight.contains_key(&ticket.key) {
            debug!(key = %ticket.key, seq, "joining in-flight listing request");
            return Issue::Joined(ticket);
        }

        self.in_flight.insert(ticket.key.clone(), seq);
        Issue::Fetch(ticket)
    }

    pub fn finish(&mut self, ticket: Ticket, result: Result<Vec<Listing>, ApiError>) -> Completion {
        if self.in_flight.get(&ticket.key) == Some(&ticket.seq) {
            self.in_flight.remove(&ticket.key);
        }

        let outcome = match result {
            Ok(listings) => {
                let data: Arc<[Listing]> = listings.into();
                self.store(ticket.key.clone(), data.clone());
                Ok(data)
            }
            Err(err) => {
                warn!(key = %ticket.key, error = %err, "listing fetch failed");
                Err(err.to_string())
            }
        };

        // Matched by key, not sequence: joined requests complete through the
        // request they joined.
        let applied = self
            .latest
            .as_ref()
            .is_some_and(|(_, key, _)| *key == ticket.key);

        if applied {
            self.state = match &outcome {
                Ok(data) => QueryState::Ready(data.clone()),
                Err(msg) => QueryState::Failed(msg.clone()),
            };
        } else {
            debug!(key = %ticket.key, seq = ticket.seq, "discarding stale listing response");
        }

        Completion { outcome, applied }
    }

    /// Issue and run a request synchronously through `source`.
    pub fn fetch_with<F>(&mut self, predicate: &FilterPredicate, source: F) -> QueryState
    where
        F: FnOnce(&FilterPredicate) -> Result<Vec<Listing>, ApiError>,
    {
        match self.begin(predicate) {
            Issue::Cached(_) | Issue::Joined(_) => {}
            Issue::Fetch(ticket) => {
                let result = source(predicate);
                self.finish(ticket, result);
            }
        }
        self.state.clone()
    }

    /// Re-issues the latest predicate. Manual only; failures are never retried
    /// automatically.
    pub fn retry(&mut self) -> Option<Issue> {
        let predicate = self.latest.as_ref().map(|(_, _, p)| p.clone())?;
        Some(self.begin(&predicate))
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn latest_predicate(&self) -> Option<&FilterPredicate> {
        self.latest.as_ref().map(|(_, _, p)| p)
    }

    pub fn is_in_flight(&self, predicate: &FilterPredicate) -> bool {
        self.in_flight.contains_key(&predicate.to_query())
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.order.clear();
    }

    fn cached(&mut self, key: &str) -> Option<Arc<[Listing]>> {
        let expired = match (self.cache.get(key), self.ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => entry.stored_at.elapsed() > ttl,
            (Some(_), None) => false,
        };

        if expired {
            self.cache.remove(key);
            self.order.retain(|k| k != key);
            return None;
        }

        self.cache.get(key).map(|entry| entry.data.clone())
    }

    fn store(&mut self, key: String, data: Arc<[Listing]>) {
        if !self.cache.contains_key(&key) {
            while self.cache.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.cache.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(key.clone());
        }

        self.cache.insert(
            key,
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }
}
