pub mod fallback;
pub mod format;
pub mod grouping;
pub mod service;

#[cfg(test)]
mod service_test;

pub use fallback::fallback_results;
pub use format::{format_grouped, format_search_result};
pub use grouping::{ResultGroup, group_by_kind};
pub use service::{NoBackend, SearchBackend, SearchOptions, SearchService, search_local};
