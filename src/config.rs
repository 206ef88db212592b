use crate::api::{ApiClient, ApiResult, HttpSearchBackend};
use crate::interactive::constants::SEARCH_DEBOUNCE_MS;
use crate::search::{SearchOptions, SearchService};
use crate::session::LocalStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = SEARCH_DEBOUNCE_MS;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DATA_DIR_NAME: &str = "atlas";

/// Resolved runtime settings, built from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Atlas REST API. `None` means search runs offline.
    pub api_url: Option<String>,
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub timeout: Duration,
    pub fallback: bool,
    pub max_results: Option<usize>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            data_dir: default_data_dir(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fallback: true,
            max_results: None,
            verbose: false,
        }
    }
}

/// `<platform data dir>/atlas`, or `./.atlas` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{DATA_DIR_NAME}")))
}

impl Config {
    /// An empty or whitespace URL counts as unset.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        self.api_url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self
    }

    pub fn store(&self) -> LocalStore {
        LocalStore::new(&self.data_dir)
    }

    pub fn api_client(&self, access_token: Option<String>) -> ApiResult<Option<ApiClient>> {
        match &self.api_url {
            Some(url) => Ok(Some(
                ApiClient::new(url, self.timeout)?.with_access_token(access_token),
            )),
            None => Ok(None),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            fallback: self.fallback,
            max_results: self.max_results,
        }
    }

    pub fn search_service(&self, client: Option<ApiClient>) -> SearchService {
        SearchService::new(
            Arc::new(HttpSearchBackend::new(client)),
            self.search_options(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(200));
        assert_eq!(DEFAULT_DEBOUNCE_MS, SEARCH_DEBOUNCE_MS);
        assert!(config.fallback);
        assert!(config.api_url.is_none());
        assert!(config.data_dir.ends_with("atlas") || config.data_dir.ends_with(".atlas"));
    }

    #[test]
    fn test_blank_api_url_means_offline() {
        let config = Config::default().with_api_url(Some("   ".to_string()));
        assert!(config.api_url.is_none());
        assert!(config.api_client(None).unwrap().is_none());
        assert!(!config.search_service(None).has_backend());
    }

    #[test]
    fn test_api_url_builds_backend() {
        let config = Config::default().with_api_url(Some(" https://api.example.com ".to_string()));
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        let client = config.api_client(Some("tok".to_string())).unwrap();
        assert!(config.search_service(client).has_backend());
    }
}
