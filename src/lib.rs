pub mod api;
pub mod config;
pub mod fuzzy;
pub mod interactive;
pub mod logging;
pub mod schemas;
pub mod search;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult, AuthApi, HttpSearchBackend};
pub use config::Config;
pub use schemas::{
    GlobalSearchFilters, GlobalSearchResponse, ResultDetails, SearchResult, SearchResultKind,
    Session, Workspace,
};
pub use search::{
    SearchBackend, SearchOptions, SearchService, format_grouped, format_search_result,
    group_by_kind, search_local,
};
pub use session::{LocalStore, Preferences, SessionStore};
