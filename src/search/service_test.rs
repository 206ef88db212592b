#[cfg(test)]
mod tests {
    use super::super::fallback::fallback_results;
    use super::super::grouping::group_by_kind;
    use super::super::service::*;
    use crate::api::{ApiError, ApiResult};
    use crate::schemas::{
        GlobalSearchFilters, GlobalSearchResponse, ResultDetails, SearchResult, SearchResultKind,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FailingBackend {
        calls: AtomicUsize,
    }

    impl SearchBackend for FailingBackend {
        fn is_configured(&self) -> bool {
            true
        }

        fn search(
            &self,
            _query: &str,
            _kinds: &[SearchResultKind],
        ) -> ApiResult<GlobalSearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Transport {
                details: "connection refused".to_string(),
            })
        }
    }

    struct RecordingBackend {
        seen: Mutex<Vec<(String, Vec<SearchResultKind>)>>,
        response: GlobalSearchResponse,
    }

    impl SearchBackend for RecordingBackend {
        fn is_configured(&self) -> bool {
            true
        }

        fn search(
            &self,
            query: &str,
            kinds: &[SearchResultKind],
        ) -> ApiResult<GlobalSearchResponse> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), kinds.to_vec()));
            Ok(self.response.clone())
        }
    }

    fn remote_result() -> SearchResult {
        SearchResult {
            id: "remote-1".to_string(),
            title: "Remote repo".to_string(),
            subtitle: Some("from the API".to_string()),
            href: "/dashboard/projects/remote".to_string(),
            meta: None,
            details: ResultDetails::Repo { full_name: None },
        }
    }

    fn ids(response: &GlobalSearchResponse) -> Vec<&str> {
        response.results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_full_dataset() {
        let service = SearchService::offline();
        let response = service.search("", &GlobalSearchFilters::default()).unwrap();

        assert_eq!(response.total, fallback_results().len());
        assert_eq!(response.results, fallback_results());
    }

    #[test]
    fn test_whitespace_query_is_treated_as_empty() {
        let service = SearchService::offline();
        let response = service.search("   \t", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(response.total, 14);
    }

    #[test]
    fn test_kind_filter_keeps_order() {
        let service = SearchService::offline();
        let filters = GlobalSearchFilters::new(vec![SearchResultKind::Event]);
        let response = service.search("", &filters).unwrap();

        assert_eq!(ids(&response), vec!["e1", "e2"]);
        assert!(response.results.iter().all(|r| r.kind() == SearchResultKind::Event));
        assert_eq!(response.total, 2);
    }

    #[test]
    fn test_kind_filter_is_inclusive_or() {
        let service = SearchService::offline();
        let filters =
            GlobalSearchFilters::new(vec![SearchResultKind::Agent, SearchResultKind::Repo]);
        let response = service.search("", &filters).unwrap();
        assert_eq!(ids(&response), vec!["r1", "r2", "r3", "a1", "a2"]);
    }

    #[test]
    fn test_aws_ranks_transaction_under_transactions_group() {
        let service = SearchService::offline();
        let response = service.search("AWS", &GlobalSearchFilters::default()).unwrap();

        assert_eq!(ids(&response), vec!["t1"]);
        assert_eq!(response.total, 1);

        let groups = group_by_kind(&response.results);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind.label(), "Transactions");
        assert_eq!(groups[0].items[0].1.title, "AWS invoice");
    }

    #[test]
    fn test_ranking_prefers_word_starts_and_is_stable() {
        // "notes" starts a word in both n1 ("... notes ...") and n2
        // ("Meeting notes ..."), so they tie and keep dataset order.
        // "Add global search" has no "notes".
        let service = SearchService::offline();
        let response = service.search("notes", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(ids(&response), vec!["n1", "n2"]);

        // "in" appears mid-word in many candidates ("main", "Sprint",
        // "Pending") but starts a word only in t1's "invoice".
        let response = service.search("in", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(response.results[0].id, "t1");
        assert!(response.total > 1);
    }

    #[test]
    fn test_kind_specific_fields_are_searched() {
        let service = SearchService::offline();
        let by_repo_name = service.search("docs-site", &GlobalSearchFilters::default()).unwrap();
        // r2 via title and full name, i3 via repo name
        assert_eq!(ids(&by_repo_name), vec!["r2", "i3"]);

        let by_description = service.search("drafts", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(ids(&by_description), vec!["a2"]);
    }

    #[test]
    fn test_filter_applies_before_matching() {
        let service = SearchService::offline();
        let filters = GlobalSearchFilters::new(vec![SearchResultKind::Issue]);
        let response = service.search("atlas", &filters).unwrap();
        assert_eq!(ids(&response), vec!["i1", "i2"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let service = SearchService::offline();
        let response = service.search("kubernetes", &GlobalSearchFilters::default()).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_search_is_idempotent() {
        let service = SearchService::offline();
        let filters =
            GlobalSearchFilters::new(vec![SearchResultKind::Note, SearchResultKind::Event]);
        let first = service.search("sprint", &filters).unwrap();
        let second = service.search("sprint", &filters).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_backend_response_is_returned_verbatim() {
        let backend = Arc::new(RecordingBackend {
            seen: Mutex::new(Vec::new()),
            response: GlobalSearchResponse {
                results: vec![remote_result()],
                total: 57,
            },
        });
        let service = SearchService::new(backend.clone(), SearchOptions::default());
        let filters =
            GlobalSearchFilters::new(vec![SearchResultKind::Repo, SearchResultKind::Issue]);

        let response = service.search("  remote  ", &filters).unwrap();

        assert_eq!(ids(&response), vec!["remote-1"]);
        assert_eq!(response.total, 57);
        let seen = backend.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(
                "remote".to_string(),
                vec![SearchResultKind::Repo, SearchResultKind::Issue]
            )]
        );
    }

    #[test]
    fn test_backend_failure_falls_back_to_local() {
        let backend = Arc::new(FailingBackend {
            calls: AtomicUsize::new(0),
        });
        let service = SearchService::new(backend.clone(), SearchOptions::default());

        let response = service.search("AWS", &GlobalSearchFilters::default()).unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ids(&response), vec!["t1"]);
    }

    #[test]
    fn test_backend_failure_without_fallback_is_an_error() {
        let backend = Arc::new(FailingBackend {
            calls: AtomicUsize::new(0),
        });
        let options = SearchOptions {
            fallback: false,
            ..SearchOptions::default()
        };
        let service = SearchService::new(backend, options);

        let err = service.search("AWS", &GlobalSearchFilters::default()).unwrap_err();
        assert!(err.to_string().contains("search backend failed"));
    }

    #[test]
    fn test_unconfigured_backend_always_uses_local() {
        let options = SearchOptions {
            fallback: false,
            ..SearchOptions::default()
        };
        let service = SearchService::new(Arc::new(NoBackend), options);
        assert!(!service.has_backend());
        assert!(service.search("AWS", &GlobalSearchFilters::default()).is_ok());
    }

    #[test]
    fn test_max_results_truncates_but_keeps_total() {
        let options = SearchOptions {
            max_results: Some(3),
            ..SearchOptions::default()
        };
        let service = SearchService::new(Arc::new(NoBackend), options);
        let response = service.search("", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.total, 14);
    }

    #[test]
    fn test_custom_candidates() {
        let service = SearchService::offline().with_candidates(vec![remote_result()]);
        let response = service.search("api", &GlobalSearchFilters::default()).unwrap();
        assert_eq!(ids(&response), vec!["remote-1"]);
    }

    #[test]
    fn test_search_local_matches_score_agreement() {
        let filters = GlobalSearchFilters::default();
        for query in ["sprint", "atlas app", "team", "q1", "active"] {
            let response = search_local(fallback_results(), query, &filters);
            for result in &response.results {
                assert!(crate::fuzzy::score(&result.search_text(), query) > 0);
            }
        }
    }
}
