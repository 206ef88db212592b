#[cfg(test)]
mod tests {
    use crate::interactive::application::query_state::QueryState;
    use crate::interactive::domain::models::{SearchKey, SearchRequest, SearchResponse};
    use crate::schemas::{GlobalSearchFilters, GlobalSearchResponse, SearchResultKind};
    use crate::search::fallback_results;
    use std::time::{Duration, Instant};

    const STALE: Duration = Duration::from_secs(30);

    fn key(query: &str) -> SearchKey {
        SearchKey::new(query, &GlobalSearchFilters::default())
    }

    fn response_with(ids: &[&str]) -> GlobalSearchResponse {
        let results = fallback_results()
            .iter()
            .filter(|r| ids.contains(&r.id.as_str()))
            .cloned()
            .collect();
        GlobalSearchResponse::from_results(results)
    }

    fn ok(request: &SearchRequest, data: GlobalSearchResponse) -> SearchResponse {
        SearchResponse {
            id: request.id,
            key: request.key.clone(),
            outcome: Ok(data),
        }
    }

    fn result_ids(state: &QueryState) -> Vec<String> {
        state.results().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_disabled_state_issues_nothing() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        assert!(state.set_key(key("aws"), now).is_none());
        assert!(state.refetch(now).is_none());
        assert!(!state.is_fetching());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_enable_fetches_immediately() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let request = state.enable(key(""), now).unwrap();

        assert_eq!(request.key, key(""));
        assert!(state.is_loading());
        assert!(state.is_fetching());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let a = state.enable(key("a"), now).unwrap();
        let b = state.set_key(key("b"), now).unwrap();
        assert!(b.id > a.id);

        // B resolves first, then A arrives late.
        assert!(state.complete(ok(&b, response_with(&["r1"])), now));
        assert!(!state.complete(ok(&a, response_with(&["n1"])), now));

        assert_eq!(result_ids(&state), vec!["r1"]);
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_late_response_still_fills_cache() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let a = state.enable(key("a"), now).unwrap();
        let b = state.set_key(key("b"), now).unwrap();
        state.complete(ok(&b, response_with(&["r1"])), now);
        state.complete(ok(&a, response_with(&["n1"])), now);

        // Going back to "a" is served from the cache without a request.
        assert!(state.set_key(key("a"), now).is_none());
        assert_eq!(result_ids(&state), vec!["n1"]);
    }

    #[test]
    fn test_fresh_cache_hit_skips_request() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("aws"), now).unwrap();
        state.complete(ok(&first, response_with(&["t1"])), now);
        state.set_key(key("other"), now);

        let later = now + Duration::from_secs(5);
        assert!(state.set_key(key("aws"), later).is_none());
        assert_eq!(result_ids(&state), vec!["t1"]);
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_expired_cache_entry_refetches_with_placeholder() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("aws"), now).unwrap();
        state.complete(ok(&first, response_with(&["t1"])), now);
        state.set_key(key("other"), now);

        let later = now + STALE + Duration::from_secs(1);
        let request = state.set_key(key("aws"), later);

        assert!(request.is_some());
        assert_eq!(result_ids(&state), vec!["t1"]);
        assert!(state.is_fetching());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_equivalent_filters_share_cache_entry() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);
        let note_repo =
            GlobalSearchFilters::new(vec![SearchResultKind::Note, SearchResultKind::Repo]);
        let repo_note =
            GlobalSearchFilters::new(vec![SearchResultKind::Repo, SearchResultKind::Note]);

        let first = state.enable(SearchKey::new("x", &note_repo), now).unwrap();
        state.complete(ok(&first, response_with(&["r1", "n1"])), now);
        state.set_key(key("x"), now);

        assert!(state.set_key(SearchKey::new("x", &repo_note), now).is_none());
        assert_eq!(result_ids(&state), vec!["r1", "n1"]);
    }

    #[test]
    fn test_previous_data_kept_while_loading() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("a"), now).unwrap();
        state.complete(ok(&first, response_with(&["a1"])), now);

        let second = state.set_key(key("ab"), now);

        assert!(second.is_some());
        assert!(state.is_fetching());
        assert!(!state.is_loading());
        assert_eq!(result_ids(&state), vec!["a1"]);
    }

    #[test]
    fn test_error_then_refetch() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("aws"), now).unwrap();
        state.complete(
            SearchResponse {
                id: first.id,
                key: first.key.clone(),
                outcome: Err("connection refused".to_string()),
            },
            now,
        );
        assert!(state.is_error());
        assert_eq!(state.error(), Some("connection refused"));

        let retry = state.refetch(now).unwrap();
        assert_eq!(retry.key, first.key);
        assert!(retry.id > first.id);
        assert!(!state.is_error());

        state.complete(ok(&retry, response_with(&["t1"])), now);
        assert!(!state.is_error());
        assert_eq!(result_ids(&state), vec!["t1"]);
    }

    #[test]
    fn test_refetch_bypasses_fresh_cache() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("aws"), now).unwrap();
        state.complete(ok(&first, response_with(&["t1"])), now);

        assert!(state.refetch(now).is_some());
        assert!(state.is_fetching());
    }

    #[test]
    fn test_same_key_is_noop() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key("aws"), now).unwrap();
        assert!(state.set_key(key("aws"), now).is_none());
        assert_eq!(state.latest_id(), Some(first.id));
    }

    #[test]
    fn test_cache_capacity_evicts_oldest() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 1);

        let a = state.enable(key("a"), now).unwrap();
        state.complete(ok(&a, response_with(&["r1"])), now);
        let b = state.set_key(key("b"), now).unwrap();
        state.complete(ok(&b, response_with(&["r2"])), now);

        // "a" was evicted, so it needs a request again.
        assert!(state.set_key(key("a"), now).is_some());
    }

    #[test]
    fn test_disable_keeps_data() {
        let now = Instant::now();
        let mut state = QueryState::new(STALE, 8);

        let first = state.enable(key(""), now).unwrap();
        state.complete(ok(&first, response_with(&["r1", "r2"])), now);
        state.disable();

        assert!(!state.is_enabled());
        assert_eq!(result_ids(&state), vec!["r1", "r2"]);
    }
}
