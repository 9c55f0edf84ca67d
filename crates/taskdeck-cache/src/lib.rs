//! # taskdeck-cache
//!
//! Caches the latest task-list page keyed by the exact
//! `(page, limit, status)` tuple, with stale-while-revalidate behavior:
//!
//! - Changing any part of the key starts a fresh fetch, but the previous
//!   page stays visible until the new one lands.
//! - Every fetch is stamped with a sequence number; a completion is
//!   applied only when its key is still current **and** its sequence is
//!   the latest issued. Late responses for superseded keys or sequences
//!   are discarded silently, so rapid pagination can never paint stale
//!   data over fresh data.
//! - A failed background fetch keeps the prior page visible and records
//!   the error; it is retried only by an explicit [`mutate`] or by
//!   moving to a different key — never automatically.
//!
//! [`mutate`]: ListQueryCache::mutate

#![deny(unsafe_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use taskdeck_client::{ApiError, ApiResult, TasksClient};
use taskdeck_core::{ListQuery, TaskPage};

// ─────────────────────────────────────────────────────────────────────────────
// Fetch seam
// ─────────────────────────────────────────────────────────────────────────────

/// Source of task-list pages. Implemented by [`TasksClient`]; tests use
/// scripted fakes to control completion order.
#[async_trait]
pub trait TaskLister: Send + Sync {
    /// Fetch the page identified by `query`.
    async fn list(&self, query: &ListQuery) -> ApiResult<TaskPage>;
}

#[async_trait]
impl TaskLister for TasksClient {
    async fn list(&self, query: &ListQuery) -> ApiResult<TaskPage> {
        TasksClient::list(self, query).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Point-in-time view of the cache for rendering.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Latest page whose fetch completed, possibly for a superseded key
    /// (then `is_stale` is set).
    pub page: Option<TaskPage>,
    /// Whether a fetch for the current key is outstanding.
    pub loading: bool,
    /// Error of the most recent failed fetch for the current key.
    pub error: Option<Arc<ApiError>>,
    /// Whether `page` belongs to a key other than the current one.
    pub is_stale: bool,
}

#[derive(Debug)]
struct Inner {
    /// The active key. Fetch completions for any other key are dropped.
    query: ListQuery,
    /// Latest applied page and the key it was fetched under.
    page: Option<(ListQuery, TaskPage)>,
    /// Latest failed fetch and the key it was issued under.
    error: Option<(ListQuery, Arc<ApiError>)>,
    /// Sequence stamp of the most recently issued fetch.
    latest_seq: u64,
    /// Keys with a fetch still outstanding (one entry per fetch).
    in_flight: Vec<(ListQuery, u64)>,
}

/// Single-slot cache over the task list endpoint. Shared by reference
/// from the event loop; all state lives behind one mutex that is never
/// held across an await.
#[derive(Debug)]
pub struct ListQueryCache {
    inner: Mutex<Inner>,
}

impl ListQueryCache {
    /// Create a cache positioned at `query`, with nothing fetched yet.
    #[must_use]
    pub fn new(query: ListQuery) -> Self {
        Self {
            inner: Mutex::new(Inner {
                query,
                page: None,
                error: None,
                latest_seq: 0,
                in_flight: Vec::new(),
            }),
        }
    }

    /// The currently active key.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        self.inner.lock().query
    }

    /// Switch the active key. Cached data is kept visible (stale) until
    /// a fetch for the new key completes; outstanding fetches for the
    /// old key can no longer touch the cache.
    pub fn set_query(&self, query: ListQuery) {
        let mut inner = self.inner.lock();
        if inner.query != query {
            debug!(?query, "query key changed");
            inner.query = query;
        }
    }

    /// Fetch the current key unless fresh data is already cached, the
    /// last fetch for it failed (errors are only retried explicitly), or
    /// a fetch for it is already in flight. Returns the resulting view.
    pub async fn ensure(&self, lister: &dyn TaskLister) -> Snapshot {
        let skip = {
            let inner = self.inner.lock();
            let fresh = inner.page.as_ref().is_some_and(|(key, _)| *key == inner.query);
            let failed = inner.error.as_ref().is_some_and(|(key, _)| *key == inner.query);
            fresh || failed || Self::loading_locked(&inner)
        };
        if skip {
            return self.snapshot();
        }
        self.fetch(lister).await
    }

    /// Force a re-fetch of the current key, replacing the cached page on
    /// success. This is the explicit revalidation hook used after
    /// create/delete/move mutations.
    pub async fn mutate(&self, lister: &dyn TaskLister) -> Snapshot {
        self.fetch(lister).await
    }

    /// Current view without touching the network.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock();
        let page = inner.page.as_ref().map(|(_, page)| page.clone());
        let is_stale = inner
            .page
            .as_ref()
            .is_some_and(|(key, _)| *key != inner.query);
        let error = inner
            .error
            .as_ref()
            .filter(|(key, _)| *key == inner.query)
            .map(|(_, err)| Arc::clone(err));
        Snapshot {
            page,
            loading: Self::loading_locked(&inner),
            error,
            is_stale,
        }
    }

    fn loading_locked(inner: &Inner) -> bool {
        inner.in_flight.iter().any(|(key, _)| *key == inner.query)
    }

    async fn fetch(&self, lister: &dyn TaskLister) -> Snapshot {
        let (query, seq) = {
            let mut inner = self.inner.lock();
            inner.latest_seq += 1;
            let seq = inner.latest_seq;
            let query = inner.query;
            inner.in_flight.push((query, seq));
            (query, seq)
        };

        let result = lister.list(&query).await;

        let mut inner = self.inner.lock();
        inner.in_flight.retain(|entry| *entry != (query, seq));

        // Apply only the latest-issued fetch for the still-current key;
        // everything else lost the race and is dropped.
        if query != inner.query || seq != inner.latest_seq {
            debug!(?query, seq, "discarding superseded fetch result");
            drop(inner);
            return self.snapshot();
        }

        match result {
            Ok(page) => {
                inner.page = Some((query, page));
                inner.error = None;
            }
            Err(err) => {
                inner.error = Some((query, Arc::new(err)));
            }
        }
        drop(inner);
        self.snapshot()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
