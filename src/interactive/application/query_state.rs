use crate::interactive::domain::models::{SearchKey, SearchRequest, SearchResponse};
use crate::schemas::{GlobalSearchResponse, SearchResult};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    response: GlobalSearchResponse,
    fetched_at: Instant,
}

/// Request bookkeeping between the debounced input and the search worker.
///
/// Every issued request gets the next id and becomes the only one whose
/// completion is applied. Previous data stays visible while a new key is
/// loading. Successful responses are cached per key, including late ones.
pub struct QueryState {
    enabled: bool,
    key: Option<SearchKey>,
    next_id: u64,
    latest_id: Option<u64>,
    is_fetching: bool,
    is_error: bool,
    error: Option<String>,
    data: Option<GlobalSearchResponse>,
    cache: LruCache<SearchKey, CacheEntry>,
    stale_time: Duration,
}

impl QueryState {
    pub fn new(stale_time: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            enabled: false,
            key: None,
            next_id: 1,
            latest_id: None,
            is_fetching: false,
            is_error: false,
            error: None,
            data: None,
            cache: LruCache::new(capacity),
            stale_time,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(&self) -> Option<&SearchKey> {
        self.key.as_ref()
    }

    pub fn latest_id(&self) -> Option<u64> {
        self.latest_id
    }

    /// A request is in flight.
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// In flight with nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&GlobalSearchResponse> {
        self.data.as_ref()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.data.as_ref().map(|d| d.results.as_slice()).unwrap_or(&[])
    }

    /// Turns fetching on and issues a request for `key` right away.
    pub fn enable(&mut self, key: SearchKey, now: Instant) -> Option<SearchRequest> {
        self.enabled = true;
        self.key = Some(key);
        self.fetch(now, true)
    }

    /// Stops issuing requests. Data and cache are kept for the next open.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Switches to a new key. Returns the request to send, if any.
    pub fn set_key(&mut self, key: SearchKey, now: Instant) -> Option<SearchRequest> {
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key);
        if !self.enabled {
            return None;
        }
        self.fetch(now, true)
    }

    /// Re-issues the current key, ignoring the cache.
    pub fn refetch(&mut self, now: Instant) -> Option<SearchRequest> {
        if !self.enabled {
            return None;
        }
        self.fetch(now, false)
    }

    fn fetch(&mut self, now: Instant, use_cache: bool) -> Option<SearchRequest> {
        let key = self.key.clone()?;
        let id = self.next_id;
        self.next_id += 1;
        // Anything still in flight is now outdated.
        self.latest_id = Some(id);
        self.is_error = false;
        self.error = None;

        if let Some(entry) = self.cache.get(&key) {
            self.data = Some(entry.response.clone());
            if use_cache && now.duration_since(entry.fetched_at) < self.stale_time {
                debug!(query = %key.query, "search served from cache");
                self.is_fetching = false;
                return None;
            }
        }

        self.is_fetching = true;
        Some(SearchRequest { id, key })
    }

    /// Applies a finished request. Returns false when the response belongs
    /// to a request that has since been superseded.
    pub fn complete(&mut self, response: SearchResponse, now: Instant) -> bool {
        let SearchResponse { id, key, outcome } = response;

        if let Ok(data) = &outcome {
            self.cache.put(
                key.clone(),
                CacheEntry {
                    response: data.clone(),
                    fetched_at: now,
                },
            );
        }

        if self.latest_id != Some(id) {
            debug!(id, query = %key.query, "dropping stale search response");
            return false;
        }

        self.is_fetching = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.is_error = false;
                self.error = None;
            }
            Err(message) => {
                self.is_error = true;
                self.error = Some(message);
            }
        }
        true
    }
}
