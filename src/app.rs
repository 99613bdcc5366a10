// src/app.rs
use crate::api::{ApiError, DirectoryApi};
use crate::config::AppConfig;
use crate::domain::Listing;
use crate::filters::FilterPredicate;
use crate::query::{Completion, Issue, ListingQuery, QueryState, Ticket};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// State shared by every server worker.
pub struct App {
    pub config: AppConfig,
    pub api: Arc<dyn DirectoryApi>,
    query: Mutex<ListingQuery>,
    fetched: Condvar,
}

impl App {
    pub fn new(config: AppConfig, api: Arc<dyn DirectoryApi>) -> Self {
        let ttl = (config.api.cache_ttl_secs > 0)
            .then(|| Duration::from_secs(config.api.cache_ttl_secs));
        let query = ListingQuery::with_limits(config.api.cache_entries, ttl);

        Self {
            config,
            api,
            query: Mutex::new(query),
            fetched: Condvar::new(),
        }
    }

    /// Listings for `filters`, through the shared cache.
    ///
    /// A worker asking for a predicate another worker is already fetching
    /// waits for that fetch instead of issuing its own request.
    pub fn listings(&self, filters: &FilterPredicate) -> QueryState {
        let mut query = self.lock_query();
        loop {
            match query.begin(filters) {
                Issue::Cached(data) => return QueryState::Ready(data),
                Issue::Joined(_) => {
                    query = self
                        .fetched
                        .wait(query)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                Issue::Fetch(ticket) => {
                    drop(query);
                    info!(filters = %ticket.key(), "fetching listings");
                    let fetch = FetchGuard::new(self, ticket);
                    let result = self.api.list_businesses(filters);
                    let completion = fetch.complete(result);

                    return match completion.outcome {
                        Ok(data) => QueryState::Ready(data),
                        Err(message) => QueryState::Failed(message),
                    };
                }
            }
        }
    }

    /// Claims and edits change what the API returns.
    pub fn invalidate_listings(&self) {
        self.lock_query().invalidate();
    }

    fn lock_query(&self) -> MutexGuard<'_, ListingQuery> {
        // Cache state only; safe to keep using after a poisoned lock.
        self.query.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An issued fetch that must be finished exactly once. If the API call
/// unwinds, dropping the guard fails the ticket so joined workers wake up
/// and the predicate can be fetched again.
struct FetchGuard<'a> {
    app: &'a App,
    ticket: Ticket,
    finished: bool,
}

impl<'a> FetchGuard<'a> {
    fn new(app: &'a App, ticket: Ticket) -> Self {
        Self {
            app,
            ticket,
            finished: false,
        }
    }

    fn complete(mut self, result: Result<Vec<Listing>, ApiError>) -> Completion {
        self.finished = true;
        self.finish(result)
    }

    fn finish(&self, result: Result<Vec<Listing>, ApiError>) -> Completion {
        let completion = self.app.lock_query().finish(self.ticket.clone(), result);
        self.app.fetched.notify_all();
        completion
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!(filters = %self.ticket.key(), "listing fetch aborted");
        self.finish(Err(ApiError::Network("listing fetch aborted".into())));
    }
}
