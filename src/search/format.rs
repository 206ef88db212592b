use super::grouping::group_by_kind;
use crate::schemas::{GlobalSearchResponse, SearchResult};
use colored::Colorize;

/// One result as a single line plus an optional detail line.
pub fn format_search_result(result: &SearchResult, use_color: bool) -> String {
    let kind = result.kind();
    let secondary = result.secondary_text().unwrap_or_default();
    let summary = result.details.summary();

    let mut line = if use_color {
        format!(
            "  {} {} {} {}",
            kind.icon().bright_blue(),
            result.title.bold(),
            secondary.dimmed(),
            format!("→ {}", result.href).bright_green()
        )
    } else {
        format!(
            "  {} {} {} → {}",
            kind.icon(),
            result.title,
            secondary,
            result.href
        )
    };

    if let Some(summary) = summary.filter(|s| Some(s.as_str()) != result.secondary_text()) {
        line.push_str("\n    ");
        if use_color {
            line.push_str(&summary.dimmed().to_string());
        } else {
            line.push_str(&summary);
        }
    }
    line
}

/// Results under kind headings, in the same grouping the overlay uses.
pub fn format_grouped(response: &GlobalSearchResponse, use_color: bool) -> String {
    let mut out = String::new();
    for group in group_by_kind(&response.results) {
        if !out.is_empty() {
            out.push('\n');
        }
        let heading = group.kind.label().to_uppercase();
        if use_color {
            out.push_str(&heading.bright_yellow().bold().to_string());
        } else {
            out.push_str(&heading);
        }
        out.push('\n');
        for (_, result) in group.items {
            out.push_str(&format_search_result(result, use_color));
            out.push('\n');
        }
    }
    out
}
