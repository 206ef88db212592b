//! Ordered-substring matching used by the local search fallback.
//!
//! Query terms are split on whitespace and must each occur in the haystack,
//! case-insensitively, left to right and without overlapping. This is not a
//! character-level subsequence match: `"aws inv"` matches `"AWS invoice"`,
//! `"awsinv"` does not.

use smallvec::SmallVec;

/// Score given to every haystack when the query has no terms.
pub const EMPTY_QUERY_SCORE: u32 = 1;

const WORD_START_POINTS: u32 = 2;
const INNER_POINTS: u32 = 1;

pub type Terms<'a> = SmallVec<[&'a str; 4]>;

/// Splits an already lowercased query into its non-empty terms.
pub fn terms(query: &str) -> Terms<'_> {
    query.split_whitespace().collect()
}

#[inline]
fn to_lowercase(s: &str) -> String {
    if s.is_ascii() {
        s.to_ascii_lowercase()
    } else {
        s.to_lowercase()
    }
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

/// Walks the terms over the haystack, calling `on_match` with the byte
/// offset of each match. Returns false as soon as a term is missing.
fn walk_terms(haystack: &str, terms: &[&str], mut on_match: impl FnMut(usize)) -> bool {
    let mut from = 0;
    for term in terms {
        match haystack[from..].find(term) {
            Some(offset) => {
                let start = from + offset;
                on_match(start);
                from = start + term.len();
            }
            None => return false,
        }
    }
    true
}

pub fn matches(haystack: &str, query: &str) -> bool {
    let query = to_lowercase(query);
    let terms = terms(&query);
    if terms.is_empty() {
        return true;
    }
    let haystack = to_lowercase(haystack);
    walk_terms(&haystack, &terms, |_| {})
}

/// Relative ranking score. Zero means no match; higher is better.
pub fn score(haystack: &str, query: &str) -> u32 {
    let query = to_lowercase(query);
    let terms = terms(&query);
    if terms.is_empty() {
        return EMPTY_QUERY_SCORE;
    }

    let haystack = to_lowercase(haystack);
    let mut total = 0;
    let matched = walk_terms(&haystack, &terms, |start| {
        let at_word_start = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(is_word_boundary);
        total += if at_word_start {
            WORD_START_POINTS
        } else {
            INNER_POINTS
        };
    });

    if matched { total } else { 0 }
}
