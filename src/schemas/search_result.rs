use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity kinds the global search spans. Declaration order is the display
/// priority used when grouping results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultKind {
    Repo,
    Issue,
    Note,
    Event,
    Transaction,
    Agent,
}

impl SearchResultKind {
    pub const ALL: [SearchResultKind; 6] = [
        SearchResultKind::Repo,
        SearchResultKind::Issue,
        SearchResultKind::Note,
        SearchResultKind::Event,
        SearchResultKind::Transaction,
        SearchResultKind::Agent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchResultKind::Repo => "repo",
            SearchResultKind::Issue => "issue",
            SearchResultKind::Note => "note",
            SearchResultKind::Event => "event",
            SearchResultKind::Transaction => "transaction",
            SearchResultKind::Agent => "agent",
        }
    }

    /// Plural heading shown above a group of results.
    pub fn label(self) -> &'static str {
        match self {
            SearchResultKind::Repo => "Repos",
            SearchResultKind::Issue => "Issues",
            SearchResultKind::Note => "Notes",
            SearchResultKind::Event => "Events",
            SearchResultKind::Transaction => "Transactions",
            SearchResultKind::Agent => "Agents",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SearchResultKind::Repo => "▣",
            SearchResultKind::Issue => "⎇",
            SearchResultKind::Note => "✎",
            SearchResultKind::Event => "◷",
            SearchResultKind::Transaction => "$",
            SearchResultKind::Agent => "◆",
        }
    }

    pub fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SearchResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SearchResultKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.label().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| {
                format!(
                    "unknown kind '{s}' (expected one of: repo, issue, note, event, transaction, agent)"
                )
            })
    }
}

/// Kind-specific payload. Only the fields meaningful for a kind exist on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultDetails {
    Repo {
        #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
        full_name: Option<String>,
    },
    Issue {
        #[serde(rename = "repoName", default, skip_serializing_if = "Option::is_none")]
        repo_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<String>,
    },
    Note {
        #[serde(rename = "contentPreview", default, skip_serializing_if = "Option::is_none")]
        content_preview: Option<String>,
    },
    Event {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    Transaction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
    Agent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl ResultDetails {
    pub fn kind(&self) -> SearchResultKind {
        match self {
            ResultDetails::Repo { .. } => SearchResultKind::Repo,
            ResultDetails::Issue { .. } => SearchResultKind::Issue,
            ResultDetails::Note { .. } => SearchResultKind::Note,
            ResultDetails::Event { .. } => SearchResultKind::Event,
            ResultDetails::Transaction { .. } => SearchResultKind::Transaction,
            ResultDetails::Agent { .. } => SearchResultKind::Agent,
        }
    }

    /// The free-text field of this kind that takes part in local matching.
    pub fn searchable_text(&self) -> Option<&str> {
        match self {
            ResultDetails::Repo { full_name } => full_name.as_deref(),
            ResultDetails::Issue { repo_name, .. } => repo_name.as_deref(),
            ResultDetails::Note { content_preview } => content_preview.as_deref(),
            ResultDetails::Agent { description } => description.as_deref(),
            ResultDetails::Event { .. } | ResultDetails::Transaction { .. } => None,
        }
    }

    /// Short extra line for detail displays, e.g. "09:00–09:15" for events.
    pub fn summary(&self) -> Option<String> {
        match self {
            ResultDetails::Repo { full_name } => full_name.clone(),
            ResultDetails::Issue { repo_name, state } => match (repo_name, state) {
                (Some(repo), Some(state)) => Some(format!("{repo} · {state}")),
                (Some(repo), None) => Some(repo.clone()),
                (None, Some(state)) => Some(state.clone()),
                (None, None) => None,
            },
            ResultDetails::Note { content_preview } => content_preview.clone(),
            ResultDetails::Event { start, end } => match (start, end) {
                (Some(start), Some(end)) => Some(format!("{start}–{end}")),
                (Some(start), None) => Some(start.clone()),
                (None, Some(end)) => Some(format!("until {end}")),
                (None, None) => None,
            },
            ResultDetails::Transaction { amount, date } => match (amount, date) {
                (Some(amount), Some(date)) => Some(format!("{amount} on {date}")),
                (Some(amount), None) => Some(amount.clone()),
                (None, Some(date)) => Some(date.clone()),
                (None, None) => None,
            },
            ResultDetails::Agent { description } => description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Route to navigate to when the result is activated.
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(flatten)]
    pub details: ResultDetails,
}

impl SearchResult {
    pub fn kind(&self) -> SearchResultKind {
        self.details.kind()
    }

    /// Text the local matcher runs against: title, subtitle, meta and the
    /// kind's own text field, space separated.
    pub fn search_text(&self) -> String {
        let parts = [
            Some(self.title.as_str()),
            self.subtitle.as_deref(),
            self.meta.as_deref(),
            self.details.searchable_text(),
        ];
        parts
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Secondary line: subtitle when present, otherwise meta.
    pub fn secondary_text(&self) -> Option<&str> {
        self.subtitle.as_deref().or(self.meta.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalSearchFilters {
    pub kinds: Vec<SearchResultKind>,
}

impl GlobalSearchFilters {
    pub fn new(kinds: Vec<SearchResultKind>) -> Self {
        Self { kinds }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// An empty filter lets every kind through.
    pub fn allows(&self, kind: SearchResultKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }

    pub fn toggle(&mut self, kind: SearchResultKind) {
        if let Some(pos) = self.kinds.iter().position(|k| *k == kind) {
            self.kinds.remove(pos);
        } else {
            self.kinds.push(kind);
        }
    }

    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    /// Deduplicated kinds in priority order, so that equivalent filters
    /// share a cache entry.
    pub fn cache_key(&self) -> Vec<SearchResultKind> {
        let mut kinds = self.kinds.clone();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total: usize,
}

impl GlobalSearchResponse {
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}
