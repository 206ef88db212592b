use super::fallback::fallback_results;
use crate::api::ApiResult;
use crate::fuzzy;
use crate::schemas::{GlobalSearchFilters, GlobalSearchResponse, SearchResult, SearchResultKind};
use anyhow::{Result, anyhow};
use std::sync::Arc;
use tracing::{debug, warn};

/// A remote search endpoint. `is_configured` decides whether the service
/// tries it at all.
pub trait SearchBackend: Send + Sync {
    fn is_configured(&self) -> bool;
    fn search(&self, query: &str, kinds: &[SearchResultKind]) -> ApiResult<GlobalSearchResponse>;
}

/// Backend used when no API URL is set.
pub struct NoBackend;

impl SearchBackend for NoBackend {
    fn is_configured(&self) -> bool {
        false
    }

    fn search(&self, _query: &str, _kinds: &[SearchResultKind]) -> ApiResult<GlobalSearchResponse> {
        Err(crate::api::ApiError::NotConfigured)
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search the built-in candidates when the backend fails. When false,
    /// backend failures are returned to the caller.
    pub fallback: bool,
    /// Truncate the returned list; `total` still reports every match.
    pub max_results: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fallback: true,
            max_results: None,
        }
    }
}

pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    candidates: Arc<Vec<SearchResult>>,
    options: SearchOptions,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>, options: SearchOptions) -> Self {
        Self {
            backend,
            candidates: Arc::new(fallback_results().to_vec()),
            options,
        }
    }

    pub fn offline() -> Self {
        Self::new(Arc::new(NoBackend), SearchOptions::default())
    }

    pub fn with_candidates(mut self, candidates: Vec<SearchResult>) -> Self {
        self.candidates = Arc::new(candidates);
        self
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_configured()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs one search. The backend answer is returned as-is when it
    /// succeeds; otherwise the built-in candidates are searched.
    pub fn search(
        &self,
        query: &str,
        filters: &GlobalSearchFilters,
    ) -> Result<GlobalSearchResponse> {
        let query = query.trim();

        if self.backend.is_configured() {
            match self.backend.search(query, &filters.kinds) {
                Ok(response) => {
                    debug!(query, total = response.total, "backend search succeeded");
                    return Ok(self.truncate(response));
                }
                Err(err) if self.options.fallback => {
                    warn!(query, error = %err, "backend search failed, using local results");
                }
                Err(err) => {
                    return Err(anyhow!(err.user_message()).context("search backend failed"));
                }
            }
        }

        let response = search_local(&self.candidates, query, filters);
        debug!(query, total = response.total, "local search");
        Ok(self.truncate(response))
    }

    fn truncate(&self, mut response: GlobalSearchResponse) -> GlobalSearchResponse {
        if let Some(max) = self.options.max_results {
            response.results.truncate(max);
        }
        response
    }
}

/// Filters `candidates` by kind, then ranks them against `query` with the
/// ordered-substring matcher. An empty query keeps the filtered candidates
/// in their original order.
pub fn search_local(
    candidates: &[SearchResult],
    query: &str,
    filters: &GlobalSearchFilters,
) -> GlobalSearchResponse {
    let query = query.trim();
    let filtered = candidates.iter().filter(|r| filters.allows(r.kind()));

    if query.is_empty() {
        return GlobalSearchResponse::from_results(filtered.cloned().collect());
    }

    let mut scored: Vec<(u32, &SearchResult)> = filtered
        .filter_map(|r| {
            let text = r.search_text();
            if !fuzzy::matches(&text, query) {
                return None;
            }
            let score = fuzzy::score(&text, query);
            (score > 0).then_some((score, r))
        })
        .collect();

    // Stable: ties keep candidate order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    GlobalSearchResponse::from_results(scored.into_iter().map(|(_, r)| r.clone()).collect())
}
