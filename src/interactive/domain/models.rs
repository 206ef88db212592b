use crate::schemas::{GlobalSearchFilters, GlobalSearchResponse, SearchResultKind};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    /// The shell's search trigger in the header
    Trigger,
    /// The overlay's own input
    Overlay,
}

/// What the overlay shows. Derived from the app state on every render.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OverlayView {
    Closed,
    Empty,
    Loading,
    Results,
    Error,
}

/// Identity of one search: the debounced query and the normalized kind
/// filter. Requests, cache entries and responses are all keyed by it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub query: String,
    pub kinds: Vec<SearchResultKind>,
}

impl SearchKey {
    pub fn new(query: &str, filters: &GlobalSearchFilters) -> Self {
        Self {
            query: query.to_string(),
            kinds: filters.cache_key(),
        }
    }

    pub fn filters(&self) -> GlobalSearchFilters {
        GlobalSearchFilters::new(self.kinds.clone())
    }
}

// Search request and response for the worker thread
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    pub id: u64,
    pub key: SearchKey,
}

#[derive(Clone, Debug)]
pub struct SearchResponse {
    pub id: u64,
    pub key: SearchKey,
    pub outcome: Result<GlobalSearchResponse, String>,
}

/// Sections listed in the shell sidebar.
pub const DASHBOARD_SECTIONS: [(&str, &str); 8] = [
    ("Overview", "/dashboard"),
    ("Projects", "/dashboard/projects"),
    ("Content", "/dashboard/content"),
    ("Research", "/dashboard/research"),
    ("Calendar", "/dashboard/calendar"),
    ("Finance", "/dashboard/finance"),
    ("Agents", "/dashboard/agents"),
    ("Settings", "/dashboard/settings"),
];
