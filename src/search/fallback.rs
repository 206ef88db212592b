//! Built-in candidates searched locally when no backend answers.

use crate::schemas::{ResultDetails, SearchResult};
use std::sync::LazyLock;

static FALLBACK_RESULTS: LazyLock<Vec<SearchResult>> = LazyLock::new(build_fallback_results);

/// The fixed candidate set, ordered repos, issues, notes, events,
/// transactions, agents.
pub fn fallback_results() -> &'static [SearchResult] {
    &FALLBACK_RESULTS
}

fn result(id: &str, title: &str, href: &str, meta: &str, details: ResultDetails) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: None,
        href: href.to_string(),
        meta: Some(meta.to_string()),
        details,
    }
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn build_fallback_results() -> Vec<SearchResult> {
    const PROJECTS: &str = "/dashboard/projects";
    const RESEARCH: &str = "/dashboard/research";
    const CALENDAR: &str = "/dashboard/calendar";
    const FINANCE: &str = "/dashboard/finance";
    const AGENTS: &str = "/dashboard/agents";

    let repo = |full_name: &str| ResultDetails::Repo {
        full_name: text(full_name),
    };
    let issue = |repo_name: &str, state: &str| ResultDetails::Issue {
        repo_name: text(repo_name),
        state: text(state),
    };
    let note = |preview: &str| ResultDetails::Note {
        content_preview: text(preview),
    };
    let event = |start: &str, end: &str| ResultDetails::Event {
        start: text(start),
        end: text(end),
    };
    let transaction = |amount: &str, date: &str| ResultDetails::Transaction {
        amount: text(amount),
        date: text(date),
    };
    let agent = |description: &str| ResultDetails::Agent {
        description: text(description),
    };

    vec![
        result("r1", "atlas-app", PROJECTS, "main", repo("org/atlas-app")),
        result("r2", "docs-site", PROJECTS, "docs", repo("org/docs-site")),
        result("r3", "api-gateway", PROJECTS, "main", repo("org/api-gateway")),
        result("i1", "Add global search", PROJECTS, "#42", issue("atlas-app", "open")),
        result("i2", "Fix login redirect", PROJECTS, "#38", issue("atlas-app", "closed")),
        result("i3", "Document API", PROJECTS, "#12", issue("docs-site", "open")),
        result("n1", "Sprint planning notes", RESEARCH, "Research", note("Goals and tasks for Q1")),
        result("n2", "Meeting notes – product", RESEARCH, "Research", note("Feature priorities")),
        result("e1", "Team standup", CALENDAR, "Today", event("09:00", "09:15")),
        result("e2", "Sprint review", CALENDAR, "This week", event("14:00", "15:00")),
        result("t1", "AWS invoice", FINANCE, "Paid", transaction("$120", "2025-02-01")),
        result("t2", "Software license", FINANCE, "Pending", transaction("$49", "2025-02-10")),
        result("a1", "Personal assistant", AGENTS, "Active", agent("Daily tasks and calendar")),
        result("a2", "Content writer", AGENTS, "Active", agent("Drafts and ideas")),
    ]
}
