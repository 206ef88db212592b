use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use crate::schemas::{GlobalSearchResponse, SearchResult, SearchResultKind};
use crate::search::SearchBackend;
use serde::Deserialize;

/// `GET /search` as sent by the server. Either field may be missing or null.
#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    results: Option<Vec<SearchResult>>,
    total: Option<usize>,
}

/// Builds the `/search` query string pairs: `q` only when non-empty, then
/// one `kind` pair per filter kind.
pub fn search_params<'a>(
    query: &'a str,
    kinds: &[SearchResultKind],
) -> Vec<(&'static str, &'a str)> {
    let mut params = Vec::with_capacity(kinds.len() + 1);
    if !query.is_empty() {
        params.push(("q", query));
    }
    params.extend(kinds.iter().map(|kind| ("kind", kind.as_str())));
    params
}

pub struct HttpSearchBackend {
    client: Option<ApiClient>,
}

impl HttpSearchBackend {
    pub fn new(client: Option<ApiClient>) -> Self {
        Self { client }
    }
}

impl SearchBackend for HttpSearchBackend {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn search(&self, query: &str, kinds: &[SearchResultKind]) -> ApiResult<GlobalSearchResponse> {
        let client = self.client.as_ref().ok_or(ApiError::NotConfigured)?;
        let raw: RawSearchResponse = client.get("/search", &search_params(query, kinds))?;
        Ok(GlobalSearchResponse {
            results: raw.results.unwrap_or_default(),
            total: raw.total.unwrap_or(0),
        })
    }
}
