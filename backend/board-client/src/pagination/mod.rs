//! Paginated collection fetcher.
//!
//! Replaces the per-screen "fetch page, append, remember the key, expose
//! load-more" bookkeeping with one reusable component per list.
//!
//! # State machine
//!
//! ```text
//! Idle --load_next--> Loading --success--> Idle
//!                             --failure--> Errored --load_next--> Loading
//! any --reset--> Idle (cleared)
//! ```
//!
//! # Concurrency
//!
//! Clones share one [`PageState`]. The state lock is only held for
//! bookkeeping, never across the network call. `is_loading` is the guard
//! against duplicate page loads, and a generation counter makes results
//! that arrive after a `reset` or `detach` harmless.

pub mod shape;
pub mod state;

pub use shape::{Page, PageShape};
pub use state::{PageState, PageStatus};

use crate::catalog::ListEndpoint;
use crate::error::RequestError;
use crate::executor::{GuardedOutcome, SessionGuard};

use models::PageLimit;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What a `load_next` call did, with the resulting state.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum PageLoad<T> {
    /// A page was fetched and appended.
    Loaded(PageState<T>),
    /// No-op: a load was already in flight, no pages remain, or the owner detached.
    Skipped(PageState<T>),
    /// The fetch failed; items are untouched and `last_error` is set.
    Failed(PageState<T>),
    /// The session expired; the login redirect has been issued.
    Unauthenticated(PageState<T>),
    /// The response arrived after a reset or detach and was dropped.
    Discarded(PageState<T>),
}

impl<T> PageLoad<T> {
    pub fn state(&self) -> &PageState<T> {
        match self {
            PageLoad::Loaded(state)
            | PageLoad::Skipped(state)
            | PageLoad::Failed(state)
            | PageLoad::Unauthenticated(state)
            | PageLoad::Discarded(state) => state,
        }
    }

    pub fn into_state(self) -> PageState<T> {
        match self {
            PageLoad::Loaded(state)
            | PageLoad::Skipped(state)
            | PageLoad::Failed(state)
            | PageLoad::Unauthenticated(state)
            | PageLoad::Discarded(state) => state,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, PageLoad::Unauthenticated(_))
    }
}

/// Request body: the filter's fields plus pagination.
#[derive(Serialize)]
struct PageQuery<'a, F> {
    #[serde(flatten)]
    filter: &'a F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination_key: Option<&'a str>,
    limit: u32,
}

struct FetcherInner<T, F> {
    state: PageState<T>,
    filter: F,
    generation: u64,
    detached: bool,
}

fn lock_inner<T, F>(inner: &Mutex<FetcherInner<T, F>>) -> MutexGuard<'_, FetcherInner<T, F>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears `is_loading` if the load future is dropped before it completes.
struct InFlight<'a, T, F> {
    inner: &'a Mutex<FetcherInner<T, F>>,
    generation: u64,
    armed: bool,
}

impl<T, F> InFlight<'_, T, F> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<T, F> Drop for InFlight<'_, T, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut inner = lock_inner(self.inner);
        if inner.generation == self.generation {
            debug!("Page load cancelled mid-flight");
            inner.state.is_loading = false;
        }
    }
}

enum Fetched<T> {
    Page(Page<T>),
    Unauthenticated,
    Failed(RequestError),
}

pub struct PaginatedFetcher<T, F> {
    guard: SessionGuard,
    endpoint: ListEndpoint<T>,
    page_size: PageLimit,
    inner: Arc<Mutex<FetcherInner<T, F>>>,
}

impl<T, F> Clone for PaginatedFetcher<T, F> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            endpoint: self.endpoint,
            page_size: self.page_size,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F> PaginatedFetcher<T, F>
where
    T: Clone + DeserializeOwned,
    F: Serialize,
{
    pub fn new(
        guard: SessionGuard,
        endpoint: ListEndpoint<T>,
        page_size: PageLimit,
        filter: F,
    ) -> Self {
        Self {
            guard,
            endpoint,
            page_size,
            inner: Arc::new(Mutex::new(FetcherInner {
                state: PageState::new(),
                filter,
                generation: 0,
                detached: false,
            })),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PageState<T> {
        lock_inner(&self.inner).state.clone()
    }

    pub fn status(&self) -> PageStatus {
        lock_inner(&self.inner).state.status()
    }

    pub fn endpoint(&self) -> &ListEndpoint<T> {
        &self.endpoint
    }

    /// Start over with new filter parameters.
    ///
    /// Any page load still in flight is discarded when it lands.
    pub fn reset(&self, filter: F) {
        let mut inner = lock_inner(&self.inner);
        inner.generation = inner.generation.wrapping_add(1);
        inner.filter = filter;
        inner.state = PageState::new();
        debug!("Reset pagination for {}", self.endpoint.path());
    }

    /// The owning screen is gone: drop in-flight results and ignore further loads.
    pub fn detach(&self) {
        let mut inner = lock_inner(&self.inner);
        inner.detached = true;
        inner.generation = inner.generation.wrapping_add(1);
        inner.state.is_loading = false;
    }

    /// Fetch the next page and append it.
    pub async fn load_next(&self) -> PageLoad<T> {
        let (generation, body) = {
            let mut inner = lock_inner(&self.inner);

            if inner.detached || inner.state.is_loading || !inner.state.has_more {
                return PageLoad::Skipped(inner.state.clone());
            }

            let query = PageQuery {
                filter: &inner.filter,
                pagination_key: inner.state.continuation_key.as_deref(),
                limit: self.page_size.get(),
            };

            let serialized = serde_json::to_value(&query);

            match serialized {
                Ok(body) => {
                    inner.state.is_loading = true;
                    (inner.generation, body)
                }
                Err(e) => {
                    inner.state.last_error = Some(RequestError::invalid_request(format!(
                        "Failed to build page request: {e}"
                    )));
                    return PageLoad::Failed(inner.state.clone());
                }
            }
        };

        let mut in_flight = InFlight {
            inner: &self.inner,
            generation,
            armed: true,
        };

        let fetched = self.fetch(&body).await;

        let mut inner = lock_inner(&self.inner);
        in_flight.disarm();

        if inner.generation != generation {
            debug!(
                "Discarding stale page for {} (reset or detached)",
                self.endpoint.path()
            );
            return PageLoad::Discarded(inner.state.clone());
        }

        inner.state.is_loading = false;

        match fetched {
            Fetched::Page(page) => {
                debug!(
                    "Loaded {} items from {} (more: {})",
                    page.items.len(),
                    self.endpoint.path(),
                    page.continuation_key.is_some()
                );
                inner.state.apply_page(page.items, page.continuation_key);
                PageLoad::Loaded(inner.state.clone())
            }
            Fetched::Unauthenticated => PageLoad::Unauthenticated(inner.state.clone()),
            Fetched::Failed(error) => {
                warn!(
                    "Page load failed for {} ({}): {error}",
                    self.endpoint.path(),
                    error.error_category()
                );
                inner.state.last_error = Some(error);
                PageLoad::Failed(inner.state.clone())
            }
        }
    }

    async fn fetch(&self, body: &Value) -> Fetched<T> {
        let outcome: GuardedOutcome<Value> = self.guard.post(self.endpoint.path(), body).await;

        match outcome {
            GuardedOutcome::Success(value) => {
                match self.endpoint.shape().decode(value, self.page_size) {
                    Ok(page) => Fetched::Page(page),
                    Err(error) => Fetched::Failed(error),
                }
            }
            GuardedOutcome::Unauthenticated => Fetched::Unauthenticated,
            GuardedOutcome::Failure(error) => Fetched::Failed(error),
        }
    }
}
