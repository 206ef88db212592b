use crate::schemas::{SearchResult, SearchResultKind};

/// One heading's worth of results. `items` hold `(flat_index, result)`
/// pairs, where `flat_index` is the position in the ranked list and is what
/// the selection cursor points at.
#[derive(Debug)]
pub struct ResultGroup<'a> {
    pub kind: SearchResultKind,
    pub items: Vec<(usize, &'a SearchResult)>,
}

/// Groups ranked results by kind. Groups follow the fixed kind priority;
/// items keep their ranking order inside a group.
pub fn group_by_kind(results: &[SearchResult]) -> Vec<ResultGroup<'_>> {
    let mut groups: Vec<ResultGroup<'_>> = SearchResultKind::ALL
        .iter()
        .map(|&kind| ResultGroup {
            kind,
            items: Vec::new(),
        })
        .collect();

    for (index, result) in results.iter().enumerate() {
        groups[result.kind().priority()].items.push((index, result));
    }

    groups.retain(|group| !group.items.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ResultDetails;

    fn make(id: &str, details: ResultDetails) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: id.to_string(),
            subtitle: None,
            href: "/".to_string(),
            meta: None,
            details,
        }
    }

    fn note(id: &str) -> SearchResult {
        make(id, ResultDetails::Note { content_preview: None })
    }

    fn repo(id: &str) -> SearchResult {
        make(id, ResultDetails::Repo { full_name: None })
    }

    fn agent(id: &str) -> SearchResult {
        make(id, ResultDetails::Agent { description: None })
    }

    #[test]
    fn test_groups_follow_kind_priority() {
        let results = vec![agent("a1"), note("n1"), repo("r1"), note("n2")];
        let groups = group_by_kind(&results);
        let kinds: Vec<SearchResultKind> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![SearchResultKind::Repo, SearchResultKind::Note, SearchResultKind::Agent]
        );
    }

    #[test]
    fn test_items_keep_rank_order_and_flat_index() {
        let results = vec![note("n2"), repo("r1"), note("n1")];
        let groups = group_by_kind(&results);
        let notes: Vec<(usize, &str)> = groups[1]
            .items
            .iter()
            .map(|(i, r)| (*i, r.id.as_str()))
            .collect();
        assert_eq!(notes, vec![(0, "n2"), (2, "n1")]);
    }

    #[test]
    fn test_empty_results_have_no_groups() {
        assert!(group_by_kind(&[]).is_empty());
    }
}
